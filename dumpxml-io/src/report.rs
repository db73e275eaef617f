//! Validation outcomes

use dumpxml_codec::{Mismatch, StructureError};
use std::fmt;
use thiserror::Error;

/// Result of checking one sampled record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The XML record equals the JSON record
    Matched {
        /// Identifier shared by both records
        id: String,
    },
    /// The XML record diverges from the JSON record
    Mismatched {
        /// Identifier shared by both records
        id: String,
        /// First divergence found
        mismatch: Mismatch,
    },
    /// No XML record carries the sample's identifier
    NoMatch {
        /// Identifier of the sample, if it has one
        id: Option<String>,
    },
}

impl SampleOutcome {
    /// Identifier of the sampled record
    pub fn id(&self) -> Option<&str> {
        match self {
            SampleOutcome::Matched { id } | SampleOutcome::Mismatched { id, .. } => Some(id),
            SampleOutcome::NoMatch { id } => id.as_deref(),
        }
    }

    /// True for [`SampleOutcome::Matched`]
    pub fn is_match(&self) -> bool {
        matches!(self, SampleOutcome::Matched { .. })
    }
}

impl fmt::Display for SampleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleOutcome::Matched { id } => write!(f, "Record {} matched successfully!", id),
            SampleOutcome::Mismatched { id, .. } => write!(f, "Record {} did not match!", id),
            SampleOutcome::NoMatch { id } => write!(
                f,
                "No matching XML record found for ID: {}",
                id.as_deref().unwrap_or("None")
            ),
        }
    }
}

/// Outcomes of one sampling pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// One entry per draw, in draw order
    pub outcomes: Vec<SampleOutcome>,
    /// Records in the JSON input
    pub json_records: usize,
    /// `record` elements in the XML document
    pub xml_records: usize,
}

impl ValidationReport {
    /// Draws whose XML record matched
    pub fn matched(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_match()).count()
    }

    /// Draws whose XML record diverged
    pub fn mismatched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SampleOutcome::Mismatched { .. }))
            .count()
    }

    /// Draws without an XML counterpart
    pub fn unmatched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SampleOutcome::NoMatch { .. }))
            .count()
    }

    /// True when at least one record was drawn and every draw matched
    pub fn is_clean(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(SampleOutcome::is_match)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sampled {} records: {} matched, {} mismatched, {} without XML counterpart",
            self.outcomes.len(),
            self.matched(),
            self.mismatched(),
            self.unmatched()
        )
    }
}

/// Why a validation run stopped before sampling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbortReason {
    /// The XML document is not well formed
    #[error("Could not parse XML file: {0}")]
    XmlParse(String),
    /// The XML document does not have the expected layout
    #[error("Invalid XML structure: {0}")]
    Structure(#[from] StructureError),
    /// The JSON input is not an array of records
    #[error("JSON input must be an array of records, found {found}")]
    NotARecordArray {
        /// Kind of the JSON root
        found: String,
    },
}

/// Result of a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRun {
    /// Sampling ran to completion
    Completed(ValidationReport),
    /// The documents could not be sampled
    Aborted(AbortReason),
}

impl ValidationRun {
    /// Report of a completed run
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ValidationRun::Completed(report) => Some(report),
            ValidationRun::Aborted(_) => None,
        }
    }

    /// True when the run completed and every draw matched
    pub fn is_clean(&self) -> bool {
        self.report().is_some_and(ValidationReport::is_clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumpxml_codec::MismatchKind;
    use dumpxml_format::FieldPath;

    fn mismatched(id: &str) -> SampleOutcome {
        SampleOutcome::Mismatched {
            id: id.into(),
            mismatch: Mismatch::new(
                FieldPath::root().child("status"),
                MismatchKind::MissingElement {
                    name: "status".into(),
                },
            ),
        }
    }

    #[test]
    fn outcome_lines() {
        assert_eq!(
            SampleOutcome::Matched { id: "A1".into() }.to_string(),
            "Record A1 matched successfully!"
        );
        assert_eq!(mismatched("B2").to_string(), "Record B2 did not match!");
        assert_eq!(
            SampleOutcome::NoMatch { id: Some("C3".into()) }.to_string(),
            "No matching XML record found for ID: C3"
        );
        assert_eq!(
            SampleOutcome::NoMatch { id: None }.to_string(),
            "No matching XML record found for ID: None"
        );
    }

    #[test]
    fn report_counts() {
        let report = ValidationReport {
            outcomes: vec![
                SampleOutcome::Matched { id: "A1".into() },
                mismatched("B2"),
                SampleOutcome::NoMatch { id: None },
                SampleOutcome::Matched { id: "A1".into() },
            ],
            json_records: 3,
            xml_records: 2,
        };
        assert_eq!(report.matched(), 2);
        assert_eq!(report.mismatched(), 1);
        assert_eq!(report.unmatched(), 1);
        assert!(!report.is_clean());
        assert_eq!(
            report.to_string(),
            "Sampled 4 records: 2 matched, 1 mismatched, 1 without XML counterpart"
        );
        assert_eq!(report.outcomes[1].id(), Some("B2"));
    }

    #[test]
    fn run_cleanliness() {
        let clean = ValidationRun::Completed(ValidationReport {
            outcomes: vec![SampleOutcome::Matched { id: "A1".into() }],
            json_records: 1,
            xml_records: 1,
        });
        assert!(clean.is_clean());

        let empty = ValidationRun::Completed(ValidationReport::default());
        assert!(!empty.is_clean());

        let aborted = ValidationRun::Aborted(AbortReason::XmlParse("unexpected end of stream".into()));
        assert!(!aborted.is_clean());
        assert!(aborted.report().is_none());
        assert_eq!(
            AbortReason::NotARecordArray {
                found: "object".into()
            }
            .to_string(),
            "JSON input must be an array of records, found object"
        );
    }
}
