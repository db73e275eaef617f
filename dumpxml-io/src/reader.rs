//! Loading input files

use dumpxml_format::{DumpError, FileRole, Result};
use serde_json::Value;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Read and parse a JSON data dump.
///
/// Fails with [`DumpError::NotFound`] before opening anything if the path does
/// not exist, and with [`DumpError::Json`] if the content is not valid JSON.
pub fn read_json_file(path: &Path) -> Result<Value> {
    ensure_exists(path, FileRole::InputJson)?;
    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), "loaded JSON input");
    Ok(value)
}

/// Read an XML document as text. Parsing is left to the caller so that a
/// malformed document can be reported without failing the whole run.
pub fn load_xml_file(path: &Path) -> Result<String> {
    ensure_exists(path, FileRole::OutputXml)?;
    let text = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded XML document");
    Ok(text)
}

fn ensure_exists(path: &Path, role: FileRole) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(DumpError::NotFound {
            role,
            path: path.to_path_buf(),
        })
    }
}
