#![allow(missing_docs)]

mod common;

use lazyjson::{ErrorKind, LazyObject, LazyValue, ValueKind};
use serde_json::Value;

use crate::common::{NESTED_DOCUMENT, SAMPLE_COUNT};

#[test]
fn navigates_nested_document() {
    let doc: LazyObject = NESTED_DOCUMENT.parse().unwrap();

    let service = doc.get_object("service").unwrap();
    assert_eq!(service.get_string("name").unwrap(), "ingest");
    assert!(service.is_null("owner").unwrap());
    assert_eq!(service.get_int("replicas").unwrap(), 3);
    assert!((service.get_double("load_factor").unwrap() - 0.75).abs() < f64::EPSILON);

    let limits = service.get_object("limits").unwrap();
    assert_eq!(limits.get_int("max_body").unwrap(), 1_048_576);
    assert!(matches!(
        limits.get_int("burst").unwrap_err().kind(),
        ErrorKind::NumericOverflow { target: "i32", .. }
    ));
    assert_eq!(limits.get_long("burst").unwrap(), 2_147_483_648);

    let events = doc.get_array("events").unwrap();
    assert_eq!(events.get_object(2).unwrap().get_string("kind").unwrap(), "stop");
    assert_eq!(events.get_object(1).unwrap().get_int("at").unwrap(), 15);

    let grid = doc.get_array("grid").unwrap();
    assert_eq!(grid.get_array(1).unwrap().get_int(0).unwrap(), 3);
    assert!(grid.get_array(2).unwrap().is_empty());
}

#[test]
fn escaped_keys_match_decoded_names() {
    let doc = LazyObject::parse(NESTED_DOCUMENT).unwrap();
    assert_eq!(doc.get_string("caf\u{e9}").unwrap(), "menu");
    assert!(doc.get_boolean("tab\tkey").unwrap());
    assert_eq!(doc.get_string("say \"hi\"").unwrap(), "quoted");
    // the escaped spelling is not the name
    assert!(!doc.has(r"caf\u00e9"));
    assert!(!doc.has(r"tab\tkey"));
}

#[test]
fn duplicate_names_resolve_to_the_first() {
    let settings = LazyObject::parse(NESTED_DOCUMENT)
        .unwrap()
        .get_object("settings")
        .unwrap();
    assert_eq!(settings.get_string("mode").unwrap(), "first");
    assert_eq!(settings.len(), 3);
    let keys: Vec<String> = settings.keys().map(|k| k.unwrap().into_owned()).collect();
    assert_eq!(keys, ["mode", "retries", "mode"]);
}

#[test]
fn long_array_sweep() {
    let samples = LazyObject::parse(NESTED_DOCUMENT)
        .unwrap()
        .get_array("samples")
        .unwrap();
    assert_eq!(samples.len(), SAMPLE_COUNT);
    for i in 0..SAMPLE_COUNT {
        assert_eq!(samples.get_long(i).unwrap(), i64::try_from(i * i).unwrap(), "index {i}");
    }
    let total: i64 = samples
        .iter()
        .map(|value| match value.unwrap() {
            LazyValue::Number(n) => n.as_i64().unwrap(),
            other => panic!("expected a number, got {:?}", other.kind()),
        })
        .sum();
    assert_eq!(total, 20_540);
    assert!(samples.get_long(SAMPLE_COUNT).is_err());
}

#[test]
fn mixed_array_kinds() {
    let doc = LazyObject::parse(NESTED_DOCUMENT).unwrap();
    let mixed = doc.get_array("mixed").unwrap();
    let kinds: Vec<ValueKind> = (0..mixed.len()).map(|i| mixed.kind(i).unwrap()).collect();
    assert_eq!(
        kinds,
        [
            ValueKind::String,
            ValueKind::Object,
            ValueKind::Number,
            ValueKind::Array,
            ValueKind::Boolean
        ]
    );
    assert!((mixed.get_double(2).unwrap() + 2500.0).abs() < f64::EPSILON);
    assert!(mixed.get_array(3).unwrap().is_null(0).unwrap());
}

#[test]
fn raw_spans_reparse_to_the_same_values() {
    let doc = LazyObject::parse(NESTED_DOCUMENT).unwrap();
    let expected: Value = serde_json::from_str(NESTED_DOCUMENT).unwrap();
    assert_eq!(serde_json::from_str::<Value>(doc.as_raw()).unwrap(), expected);

    for entry in doc.entries() {
        let (key, value) = entry.unwrap();
        let raw = match &value {
            LazyValue::Object(object) => object.as_raw(),
            LazyValue::Array(array) => array.as_raw(),
            _ => continue,
        };
        let reparsed: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(&reparsed, &expected[&*key], "{key}");
    }
}

#[test]
fn keys_follow_declaration_order() {
    let doc = LazyObject::parse(NESTED_DOCUMENT).unwrap();
    let keys: Vec<String> = doc.keys().map(|k| k.unwrap().into_owned()).collect();
    let expected: Value = serde_json::from_str(NESTED_DOCUMENT).unwrap();
    let expected_keys: Vec<&String> = expected.as_object().unwrap().keys().collect();
    assert_eq!(keys.iter().collect::<Vec<_>>(), expected_keys);
    assert_eq!(doc.len(), keys.len());
}

#[test]
fn root_parse_entry_point() {
    match lazyjson::parse(NESTED_DOCUMENT).unwrap() {
        LazyValue::Object(object) => {
            assert!(object.has("empty"));
            assert!(object.get_object("empty").unwrap().is_empty());
        }
        other => panic!("expected an object root, got {:?}", other.kind()),
    }
}
