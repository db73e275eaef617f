//! XML serialization of wrapped documents
//!
//! Objects become elements with one child per entry in input order. A
//! sequence repeats its key's element once per item, which is what gives
//! wrapped fields their `<names><name/>..</names>` layout. Null values, empty
//! strings and objects with nothing to emit are written as empty elements.

use crate::transform::WrappedDocument;
use dumpxml_format::constants::{XML_ENCODING, XML_VERSION};
use dumpxml_format::{
    is_valid_element_name, is_xml_char, scalar_text, DumpError, FieldPath, Result,
};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::io::Write;

/// Serialize a wrapped document to a string with the given indentation.
pub fn to_xml_string(doc: &WrappedDocument, indent: usize) -> Result<String> {
    let mut writer = XmlDocumentWriter::new(Vec::new(), indent);
    writer.write_document(doc)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| DumpError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Pretty-printing XML writer for wrapped documents
pub struct XmlDocumentWriter<W: Write> {
    writer: Writer<W>,
    elements_written: usize,
}

impl<W: Write> XmlDocumentWriter<W> {
    /// Create a writer indenting each level by `indent` spaces
    pub fn new(inner: W, indent: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', indent),
            elements_written: 0,
        }
    }

    /// Write the declaration, the document and a trailing newline
    pub fn write_document(&mut self, doc: &WrappedDocument) -> Result<()> {
        tracing::debug!(records = doc.shape().record_count(), "writing XML document");
        self.writer.write_event(Event::Decl(BytesDecl::new(
            XML_VERSION,
            Some(XML_ENCODING),
            None,
        )))?;
        for (tag, value) in doc.root() {
            self.write_entry(tag, value, &FieldPath::root().child(tag))?;
        }
        self.writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    /// Number of elements emitted so far
    pub fn elements_written(&self) -> usize {
        self.elements_written
    }

    /// Consume the writer and return the underlying sink
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_entry(&mut self, name: &str, value: &Value, path: &FieldPath) -> Result<()> {
        match value {
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    self.write_entry(name, item, &path.index(idx))?;
                }
                Ok(())
            }
            Value::Object(map) if has_content(map) => {
                check_name(name, path)?;
                self.writer.write_event(Event::Start(BytesStart::new(name)))?;
                for (key, child) in map {
                    self.write_entry(key, child, &path.child(key))?;
                }
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
                self.elements_written += 1;
                Ok(())
            }
            Value::Object(_) => self.write_empty(name, path),
            scalar => match scalar_text(scalar) {
                Some(text) if !text.is_empty() => {
                    check_name(name, path)?;
                    check_text(&text, path)?;
                    self.writer.write_event(Event::Start(BytesStart::new(name)))?;
                    self.writer
                        .write_event(Event::Text(BytesText::from_escaped(escape_text(&text))))?;
                    self.writer.write_event(Event::End(BytesEnd::new(name)))?;
                    self.elements_written += 1;
                    Ok(())
                }
                _ => self.write_empty(name, path),
            },
        }
    }

    fn write_empty(&mut self, name: &str, path: &FieldPath) -> Result<()> {
        check_name(name, path)?;
        self.writer.write_event(Event::Empty(BytesStart::new(name)))?;
        self.elements_written += 1;
        Ok(())
    }
}

fn check_name(name: &str, path: &FieldPath) -> Result<()> {
    if is_valid_element_name(name) {
        Ok(())
    } else {
        Err(DumpError::InvalidElementName {
            name: name.to_string(),
            path: path.to_string(),
        })
    }
}

fn check_text(text: &str, path: &FieldPath) -> Result<()> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        None => Ok(()),
        Some(character) => Err(DumpError::InvalidCharacter {
            character,
            path: path.to_string(),
        }),
    }
}

/// Markup escaping plus `\r` as a character reference, which parsers would
/// otherwise fold into `\n`.
fn escape_text(text: &str) -> Cow<'_, str> {
    match escape(text) {
        escaped if escaped.contains('\r') => Cow::Owned(escaped.replace('\r', "&#xD;")),
        escaped => escaped,
    }
}

/// Whether any entry of the object produces at least one element
fn has_content(map: &Map<String, Value>) -> bool {
    map.values().any(emits_element)
}

fn emits_element(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().any(emits_element),
        _ => true,
    }
}
