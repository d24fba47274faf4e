use alloc::{format, string::String, vec::Vec};

use quickcheck_macros::quickcheck;

use crate::{LazyArray, LazyValue};

fn describe(value: &LazyValue<'_>) -> String {
    match value {
        LazyValue::Null => "null".into(),
        LazyValue::Bool(b) => format!("{b}"),
        LazyValue::Number(n) => format!("n:{n}"),
        LazyValue::String(s) => format!("s:{s:?}"),
        LazyValue::Array(a) => format!("a:{a}"),
        LazyValue::Object(o) => format!("o:{o}"),
    }
}

fn array_of(values: &[i64], strings: &[String]) -> String {
    let mut text = String::from("[");
    for (i, n) in values.iter().enumerate() {
        if i > 0 {
            text.push(',');
        }
        text.push_str(&format!("{n}"));
        if let Some(s) = strings.get(i) {
            text.push_str(&format!(",{{\"k\":{s:?}}}"));
        }
    }
    text.push(']');
    text
}

/// Forward iteration, ascending indexed reads and descending indexed reads
/// all see the same elements.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn sweeps_agree_with_random_access(values: Vec<i64>, strings: Vec<String>) -> bool {
    // `{:?}` on strings without control characters yields valid JSON.
    let strings: Vec<String> = strings
        .into_iter()
        .filter(|s| s.chars().all(|c| !c.is_control() && c.is_ascii()))
        .collect();
    let text = array_of(&values, &strings);
    let Ok(array) = LazyArray::parse(&text) else {
        return false;
    };

    let forward: Vec<String> = array
        .iter()
        .map(|v| v.map(|v| describe(&v)))
        .collect::<Result<_, _>>()
        .unwrap_or_default();
    let ascending: Vec<String> = (0..array.len())
        .map(|i| array.get(i).map(|v| describe(&v)))
        .collect::<Result<_, _>>()
        .unwrap_or_default();
    let mut descending: Vec<String> = (0..array.len())
        .rev()
        .map(|i| array.get(i).map(|v| describe(&v)))
        .collect::<Result<_, _>>()
        .unwrap_or_default();
    descending.reverse();

    forward.len() == array.len() && forward == ascending && ascending == descending
}

#[test]
fn length_reflects_index_table() {
    let array = LazyArray::parse("[1, 2, 3]").unwrap();
    // Warm the index table before asking for the length, and the other way round.
    assert_eq!(array.get_int(2).unwrap(), 3);
    assert_eq!(array.len(), 3);

    let array = LazyArray::parse("[1, 2, 3]").unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(array.get_int(2).unwrap(), 3);
    assert!(array.get_int(3).is_err());
}

#[test]
fn clones_share_the_document_but_not_caches() {
    let array = LazyArray::parse("[[1], [2]]").unwrap();
    assert_eq!(array.get_array(1).unwrap().get_int(0).unwrap(), 2);
    let copy = array.clone();
    let handle = std::thread::spawn(move || copy.get_array(0).and_then(|a| a.get_int(0)));
    assert_eq!(handle.join().unwrap().unwrap(), 1);
    assert_eq!(array.len(), 2);
}
