//! dumpxml I/O - File handling and high-level conversion/validation APIs
//!
//! This crate ties the codec to the filesystem:
//!
//! - Reading JSON data dumps and XML documents
//! - Writing converted XML
//! - `execute_convert`: JSON → XML file conversion
//! - `execute_validate`: sampled structural validation of a converted document

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod reader;
pub mod report;
pub mod sample;
pub mod writer;

// Re-export commonly used types
pub use dumpxml_codec::{Comparator, Mismatch, MismatchKind, RootShape, StructureError, Transformer};
pub use dumpxml_format::{DumpError, FieldRule, FieldRules, FileRole, Result};
pub use reader::{load_xml_file, read_json_file};
pub use report::{AbortReason, SampleOutcome, ValidationReport, ValidationRun};
pub use sample::{find_corresponding_xml_record, validate_sample};
pub use writer::write_xml_file;

use dumpxml_codec::{validate_xml_structure, XmlDocumentWriter};
use dumpxml_format::constants::{DEFAULT_INDENT, DEFAULT_SAMPLE_COUNT, REQUIRED_RECORD_FIELDS};
use dumpxml_format::ValueKind;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::path::PathBuf;

/// Source of the JSON data dump
#[derive(Debug, Clone)]
pub enum JsonInput {
    /// JSON file on disk
    Path(PathBuf),
    /// Already parsed value
    Value(Value),
}

impl JsonInput {
    fn load(self) -> Result<Value> {
        match self {
            JsonInput::Path(path) => read_json_file(&path),
            JsonInput::Value(value) => Ok(value),
        }
    }
}

/// Source of the XML document to validate
#[derive(Debug, Clone)]
pub enum XmlInput {
    /// XML file on disk
    Path(PathBuf),
    /// XML text held in memory
    Text(String),
}

impl XmlInput {
    fn load(self) -> Result<String> {
        match self {
            XmlInput::Path(path) => load_xml_file(&path),
            XmlInput::Text(text) => Ok(text),
        }
    }
}

/// Destination of converted XML
#[derive(Debug, Clone)]
pub enum XmlOutput {
    /// Write to a file, creating or truncating it
    Path(PathBuf),
    /// Return the text in [`ConvertSummary::xml`]
    Buffer,
}

/// Conversion options
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Per-key sequence rules
    pub rules: FieldRules,
    /// Spaces per nesting level
    pub indent: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            rules: FieldRules::default(),
            indent: DEFAULT_INDENT,
        }
    }
}

/// A conversion job
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    /// JSON to convert
    pub input: JsonInput,
    /// Where the XML goes
    pub output: XmlOutput,
    /// Conversion options
    pub options: ConvertOptions,
}

/// What a conversion produced
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    /// Root layout of the document
    pub shape: RootShape,
    /// Elements written
    pub elements_written: usize,
    /// Bytes of XML produced
    pub bytes_written: usize,
    /// XML text, for [`XmlOutput::Buffer`]
    pub xml: Option<String>,
}

/// Convert a JSON data dump to XML.
///
/// Conversion errors are not recovered: a missing input, malformed JSON, an
/// unsupported root or an unusable key all end the run.
pub fn execute_convert(request: ConvertRequest) -> Result<ConvertSummary> {
    let ConvertRequest {
        input,
        output,
        options,
    } = request;
    options.rules.validate()?;

    let json = input.load()?;
    let doc = Transformer::new(&options.rules).document(&json)?;

    let mut writer = XmlDocumentWriter::new(Vec::new(), options.indent);
    writer.write_document(&doc)?;
    let elements_written = writer.elements_written();
    let xml = String::from_utf8(writer.into_inner())
        .map_err(|e| DumpError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    let bytes_written = xml.len();

    let xml = match output {
        XmlOutput::Path(path) => {
            write_xml_file(&xml, &path)?;
            None
        }
        XmlOutput::Buffer => Some(xml),
    };

    tracing::info!(
        records = doc.shape().record_count(),
        elements = elements_written,
        bytes = bytes_written,
        "converted JSON to XML"
    );

    Ok(ConvertSummary {
        shape: doc.shape(),
        elements_written,
        bytes_written,
        xml,
    })
}

/// Validation options
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Per-key sequence rules; must match the ones used for conversion
    pub rules: FieldRules,
    /// Records to draw
    pub samples: usize,
    /// Seed for reproducible draws; OS entropy when unset
    pub seed: Option<u64>,
    /// Fields every `record` element must carry
    pub required_fields: Vec<String>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            rules: FieldRules::default(),
            samples: DEFAULT_SAMPLE_COUNT,
            seed: None,
            required_fields: REQUIRED_RECORD_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ValidateOptions {
    /// Random source for sampling
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// A validation job
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    /// The original JSON data dump
    pub json: JsonInput,
    /// The converted XML document
    pub xml: XmlInput,
    /// Validation options
    pub options: ValidateOptions,
}

/// Sample records from a JSON dump and check them against the converted XML.
///
/// Missing files and malformed JSON are errors. A malformed or misshapen XML
/// document aborts the run and is reported in [`ValidationRun::Aborted`].
pub fn execute_validate(request: ValidateRequest) -> Result<ValidationRun> {
    let ValidateRequest { json, xml, options } = request;
    options.rules.validate()?;

    let json = json.load()?;
    let xml_text = xml.load()?;

    let document = match roxmltree::Document::parse(&xml_text) {
        Ok(document) => document,
        Err(err) => {
            tracing::warn!(error = %err, "XML document could not be parsed");
            return Ok(ValidationRun::Aborted(AbortReason::XmlParse(err.to_string())));
        }
    };
    let root = document.root_element();

    if let Err(err) = validate_xml_structure(root, options.required_fields.as_slice()) {
        tracing::warn!(error = %err, "XML document has an invalid structure");
        return Ok(ValidationRun::Aborted(err.into()));
    }

    let Value::Array(records) = &json else {
        return Ok(ValidationRun::Aborted(AbortReason::NotARecordArray {
            found: ValueKind::of(&json).to_string(),
        }));
    };

    let comparator = Comparator::new(&options.rules);
    let mut rng = options.rng();
    let report = validate_sample(records, root, options.samples, &comparator, &mut rng);
    tracing::info!(
        samples = report.outcomes.len(),
        matched = report.matched(),
        mismatched = report.mismatched(),
        unmatched = report.unmatched(),
        "validation finished"
    );
    Ok(ValidationRun::Completed(report))
}
