//! Writing output files

use dumpxml_format::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write XML text to `path`, creating or truncating the file.
pub fn write_xml_file(xml: &str, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(xml.as_bytes())?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), bytes = xml.len(), "wrote XML document");
    Ok(())
}
