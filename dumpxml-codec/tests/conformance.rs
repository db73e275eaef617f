//! End-to-end conformance: JSON → wrapped tree → XML text → parsed XML → comparison

use dumpxml_codec::{to_xml_string, validate_xml_structure, Comparator, MismatchKind, Transformer};
use dumpxml_format::constants::REQUIRED_RECORD_FIELDS;
use dumpxml_format::FieldRules;
use serde_json::{json, Value};

fn convert(input: &Value) -> String {
    let rules = FieldRules::default();
    let doc = Transformer::new(&rules).document(input).expect("transform");
    to_xml_string(&doc, 2).expect("serialize")
}

/// Strip the declaration and indentation so documents compare on structure.
fn compact(xml: &str) -> String {
    xml.lines()
        .skip(1)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("")
}

fn registry_record(id: &str) -> Value {
    json!({
        "id": id,
        "names": [
            {"value": "Acme University", "types": ["ror_display", "label"], "lang": "en"},
            {"value": "AU", "types": ["acronym"], "lang": null}
        ],
        "types": ["education"],
        "status": "active",
        "established": 1949,
        "locations": [
            {"geonames_id": 2643743, "geonames_details": {"name": "London", "country_code": "GB", "lat": 51.50853, "lng": -0.12574}}
        ],
        "links": [{"type": "website", "value": "https://acme.example.org"}],
        "external_ids": [
            {"type": "isni", "all": ["0000 0001 2171 1133"], "preferred": "0000 0001 2171 1133"},
            {"type": "fundref", "all": ["501100000001"], "preferred": null}
        ],
        "relationships": [],
        "domains": ["acme.example.org"],
        "admin": {
            "created": {"date": "2019-02-06", "schema_version": "1.0"},
            "last_modified": {"date": "2024-04-11", "schema_version": "2.0"}
        }
    })
}

#[test]
fn single_object_produces_expected_document() {
    let input = json!({"id": "A1", "names": [{"value": "Acme"}], "all": ["x"]});
    let xml = convert(&input);
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert_eq!(
        compact(&xml),
        "<record><id>A1</id><names><name><value>Acme</value></name></names><all>x</all></record>"
    );

    let doc = roxmltree::Document::parse(&xml).expect("parse");
    let rules = FieldRules::default();
    let record = input.as_object().unwrap();
    assert_eq!(Comparator::new(&rules).compare_record(record, doc.root_element()), Ok(()));
}

#[test]
fn root_shapes() {
    let single = convert(&json!({"id": "A1"}));
    let doc = roxmltree::Document::parse(&single).unwrap();
    assert_eq!(doc.root_element().tag_name().name(), "record");

    let pair = convert(&json!([{"id": "A1"}, {"id": "B2"}]));
    let doc = roxmltree::Document::parse(&pair).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "records");
    let records: Vec<_> = root.children().filter(|n| n.is_element()).collect();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|n| n.tag_name().name() == "record"));
}

#[test]
fn empty_array_field_becomes_empty_wrapper_and_validates() {
    let input = json!([{"id": "A1", "names": []}]);
    let xml = convert(&input);
    assert_eq!(compact(&xml), "<records><record><id>A1</id><names/></record></records>");

    let doc = roxmltree::Document::parse(&xml).unwrap();
    let record_node = doc.root_element().first_element_child().unwrap();
    let rules = FieldRules::default();
    let record = input[0].as_object().unwrap();
    assert!(Comparator::new(&rules).record_matches(record, record_node));
}

#[test]
fn registry_records_round_trip_through_comparator() {
    let input = json!([registry_record("https://ror.org/0001"), registry_record("https://ror.org/0002")]);
    let xml = convert(&input);
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let root = doc.root_element();

    assert_eq!(validate_xml_structure(root, &REQUIRED_RECORD_FIELDS[..]), Ok(()));

    let rules = FieldRules::default();
    let cmp = Comparator::new(&rules);
    let nodes: Vec<_> = root.children().filter(|n| n.is_element()).collect();
    for (json_record, node) in input.as_array().unwrap().iter().zip(nodes) {
        assert_eq!(cmp.compare_record(json_record.as_object().unwrap(), node), Ok(()));
    }
}

#[test]
fn multi_valued_all_is_reported() {
    let input = json!({
        "id": "A1",
        "external_ids": [{"type": "grid", "all": ["grid.1", "grid.2"], "preferred": "grid.1"}]
    });
    let xml = convert(&input);
    assert!(compact(&xml).contains("<all>grid.1</all><all>grid.2</all>"));

    let doc = roxmltree::Document::parse(&xml).unwrap();
    let rules = FieldRules::default();
    let err = Comparator::new(&rules)
        .compare_record(input.as_object().unwrap(), doc.root_element())
        .unwrap_err();
    assert_eq!(err.path.to_string(), "external_ids[0].all");
    assert!(matches!(err.kind, MismatchKind::PassThroughMismatch { .. }));
}

#[test]
fn tampered_document_is_caught() {
    let input = json!({"id": "A1", "names": [{"value": "Acme"}], "status": "active"});
    let xml = convert(&input).replace("<value>Acme</value>", "<value>Acne</value>");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let rules = FieldRules::default();
    let err = Comparator::new(&rules)
        .compare_record(input.as_object().unwrap(), doc.root_element())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Mismatch at path: names[0].value - Expected: Acme, Found: Acne"
    );
}

#[test]
fn missing_field_in_xml_is_reported() {
    let input = json!({"id": "A1", "status": "active"});
    let xml = convert(&input).replace("<status>active</status>", "");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let rules = FieldRules::default();
    let result = Comparator::new(&rules).compare_record(input.as_object().unwrap(), doc.root_element());
    assert!(matches!(
        result,
        Err(ref m) if m.kind == MismatchKind::MissingElement { name: "status".into() }
    ));
}

#[test]
fn custom_rules_stay_in_lockstep() {
    let rules = FieldRules::default().with_array_field("aliases");
    let input = json!({"id": "A1", "aliases": ["Acme", "ACME Corp"]});
    let doc = Transformer::new(&rules).document(&input).unwrap();
    let xml = to_xml_string(&doc, 4).unwrap();
    assert!(compact(&xml).contains("<aliases><aliase>Acme</aliase><aliase>ACME Corp</aliase></aliases>"));

    let parsed = roxmltree::Document::parse(&xml).unwrap();
    assert!(Comparator::new(&rules).record_matches(input.as_object().unwrap(), parsed.root_element()));

    // The default table expects a run of <aliases> siblings instead.
    let defaults = FieldRules::default();
    assert!(!Comparator::new(&defaults).record_matches(input.as_object().unwrap(), parsed.root_element()));
}

#[test]
fn line_endings_in_values_round_trip() {
    let input = json!({
        "id": "A1",
        "status": "a\r\nb",
        "names": [{"value": "line one\rline two", "lang": null}]
    });
    let xml = convert(&input);
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let rules = FieldRules::default();
    assert_eq!(
        Comparator::new(&rules).compare_record(input.as_object().unwrap(), doc.root_element()),
        Ok(())
    );
}

#[test]
fn nested_null_requires_an_element() {
    let input = json!({"id": "A1", "admin": {"last_modified": null}});
    let xml = convert(&input).replace("<last_modified/>", "<created>x</created>");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let rules = FieldRules::default();
    let err = Comparator::new(&rules)
        .compare_record(input.as_object().unwrap(), doc.root_element())
        .unwrap_err();
    assert_eq!(err.path.to_string(), "admin.last_modified");
    assert_eq!(
        err.kind,
        MismatchKind::MissingElement {
            name: "last_modified".into()
        }
    );
}
