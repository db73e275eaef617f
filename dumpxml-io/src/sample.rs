//! Sampled validation of converted documents
//!
//! Records are drawn from the JSON input with replacement, paired with the XML
//! `record` carrying the same `id`, and compared. Each draw is independent: a
//! mismatch or a missing counterpart is recorded and sampling carries on.

use crate::report::{SampleOutcome, ValidationReport};
use dumpxml_codec::xml_nav::{element_text, find_child, find_children};
use dumpxml_codec::Comparator;
use dumpxml_format::constants::{ID_FIELD, RECORD_TAG};
use dumpxml_format::scalar_text;
use rand::seq::IndexedRandom;
use rand::Rng;
use roxmltree::Node;
use serde_json::Value;

/// Identifier of a JSON record in its text form
pub fn sample_id(record: &Value) -> Option<String> {
    record.get(ID_FIELD).and_then(scalar_text)
}

/// Linear scan for the XML record whose `id` text equals the sample's `id`
pub fn find_corresponding_xml_record<'a, 'input>(
    sample: &Value,
    xml_records: &[Node<'a, 'input>],
) -> Option<Node<'a, 'input>> {
    let id = sample_id(sample)?;
    xml_records
        .iter()
        .copied()
        .find(|record| {
            find_child(*record, ID_FIELD).is_some_and(|node| element_text(node) == id)
        })
}

/// Draw `samples` records uniformly with replacement and check each one
/// against the `record` children of `root`.
pub fn validate_sample<R: Rng + ?Sized>(
    records: &[Value],
    root: Node<'_, '_>,
    samples: usize,
    comparator: &Comparator<'_>,
    rng: &mut R,
) -> ValidationReport {
    let xml_records = find_children(root, RECORD_TAG);
    let mut outcomes = Vec::with_capacity(samples);

    for draw in 0..samples {
        let Some(sample) = records.choose(&mut *rng) else {
            tracing::warn!("JSON input holds no records to sample");
            break;
        };
        let outcome = check_sample(sample, &xml_records, comparator);
        tracing::debug!(
            draw,
            id = outcome.id().unwrap_or_default(),
            matched = outcome.is_match(),
            "sample checked"
        );
        outcomes.push(outcome);
    }

    ValidationReport {
        outcomes,
        json_records: records.len(),
        xml_records: xml_records.len(),
    }
}

fn check_sample(
    sample: &Value,
    xml_records: &[Node<'_, '_>],
    comparator: &Comparator<'_>,
) -> SampleOutcome {
    let id = sample_id(sample);
    let (Some(id), Some(record), Some(xml_record)) = (
        id.clone(),
        sample.as_object(),
        find_corresponding_xml_record(sample, xml_records),
    ) else {
        return SampleOutcome::NoMatch { id };
    };

    match comparator.compare_record(record, xml_record) {
        Ok(()) => SampleOutcome::Matched { id },
        Err(mismatch) => SampleOutcome::Mismatched { id, mismatch },
    }
}
