use alloc::{string::String, vec::Vec};

use rstest::rstest;

use crate::{LazyArray, LazyObject, LazyValue, ParserOptions, ValueKind, parse, parse_with};

#[rstest]
#[case("{}")]
#[case("[]")]
#[case(" [ ] ")]
#[case("\t{\r\n}\n")]
#[case("[0, -0, 0.0, -0.0e0, 1E+2, 1e-2, 123456789012345678901234567890]")]
#[case("[true, false, null]")]
#[case(r#"{"": "", " ": " "}"#)]
#[case(r#"[[[[[[[[[["deep"]]]]]]]]]]"#)]
#[case(r#"{"a": {"b": {"c": [1, {"d": []}]}}}"#)]
#[case(r#"["\"\\\/\b\f\n\r\t"]"#)]
#[case("[\"\u{7f}\u{80}\u{10ffff}\"]")]
fn accepts(#[case] text: &str) {
    let value = parse(text).unwrap();
    let raw = match &value {
        LazyValue::Object(object) => object.as_raw(),
        LazyValue::Array(array) => array.as_raw(),
        other => panic!("root parsed as {:?}", other.kind()),
    };
    assert_eq!(raw, text.trim_matches([' ', '\t', '\r', '\n']));
}

#[test]
fn root_kind_selects_the_view() {
    assert_eq!(parse("{}").unwrap().kind(), ValueKind::Object);
    assert_eq!(parse("[]").unwrap().kind(), ValueKind::Array);
    assert!(parse(r#"{"a":1}"#).unwrap().into_object().is_some());
    assert!(parse("[1]").unwrap().into_object().is_none());
}

#[test]
fn nested_access_chain() {
    let object = LazyObject::parse(r#"{"a":[1,2,{"b":true}]}"#).unwrap();
    assert!(object.get_array("a").unwrap().get_object(2).unwrap().get_boolean("b").unwrap());
}

#[test]
fn string_decoding() {
    let array = LazyArray::parse(r#"["a\"b", "\u0041b", "\uD83D\uDE00", "caf\u00e9", "x\/y"]"#).unwrap();
    let strings: Vec<String> = (0..array.len())
        .map(|i| array.get_string(i).unwrap().into_owned())
        .collect();
    assert_eq!(strings, ["a\"b", "Ab", "\u{1F600}", "caf\u{e9}", "x/y"]);
}

#[test]
#[allow(clippy::float_cmp)]
fn number_conversions() {
    let array = LazyArray::parse("[-0.5e+2, 42, -7, 1e2, 9223372036854775807]").unwrap();
    assert_eq!(array.get_double(0).unwrap(), -50.0);
    assert_eq!(array.get_int(1).unwrap(), 42);
    assert_eq!(array.get_long(2).unwrap(), -7);
    assert_eq!(array.get_double(3).unwrap(), 100.0);
    assert_eq!(array.get_long(4).unwrap(), i64::MAX);
    assert_eq!(array.get_double(1).unwrap(), 42.0);
}

#[test]
fn generic_values() {
    let array = LazyArray::parse(r#"[null, true, 1.25, "s", [0], {"k": 1}]"#).unwrap();
    let values: Vec<LazyValue<'_>> = array.iter().map(Result::unwrap).collect();
    assert!(matches!(values[0], LazyValue::Null));
    assert!(matches!(values[1], LazyValue::Bool(true)));
    match &values[2] {
        LazyValue::Number(number) => assert_eq!(number.as_str(), "1.25"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(&values[3], LazyValue::String(s) if s == "s"));
    assert_eq!(values[4].clone().into_array().unwrap().len(), 1);
    let object = values[5].clone().into_object().unwrap();
    assert_eq!(object.get_int("k").unwrap(), 1);
}

#[test]
fn lenient_options() {
    let options = ParserOptions {
        allow_leading_zeros: true,
        allow_trailing_data: true,
        ..Default::default()
    };
    let value = parse_with("[007, -01.5] and then some", &options).unwrap();
    let array = value.into_array().unwrap();
    assert_eq!(array.get_int(0).unwrap(), 7);
    assert_eq!(array.as_raw(), "[007, -01.5]");
}

#[test]
fn from_str() {
    let object: LazyObject = r#"{"n": 1}"#.parse().unwrap();
    assert_eq!(object.get_long("n").unwrap(), 1);
    let array: LazyArray = "[1]".parse().unwrap();
    assert_eq!(array.get_long(0).unwrap(), 1);
    assert!("[1]".parse::<LazyObject>().is_err());
}
