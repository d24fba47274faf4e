#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use lazyjson::{ErrorKind, LazyValue, ParserOptions};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // option flags

/// Below serde_json's recursion limit, so depth never decides a disagreement.
const MAX_DEPTH: usize = 100;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    // Not JSON whitespace; documents containing these must be rejected.
    "\u{00A0}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{3000}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);

        let limit = max_size - HEADER;
        let mut len = HEADER;
        len += append_whitespace(&mut data[len..], limit);
        len += append_document(&mut data[len..], size, max_size - len);
        len += append_whitespace(&mut data[len..], max_size - len);
        len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight whitespace code points, never more than `limit`
/// bytes. Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        // Mostly JSON whitespace.
        let table = if rng.random_ratio(1, 16) { WS_TABLE } else { &WS_TABLE[..4] };
        let n_codepoints = rng.random_range(1..=limit.min(8));
        let mut written = 0;
        for _ in 0..n_codepoints {
            let w = table[rng.random_range(0..table.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

/// Appends a serialized object or array, truncated to `limit` bytes.
fn append_document(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break match value.0 {
                root @ (Value::Array(_) | Value::Object(_)) => root,
                scalar => Value::Array(vec![scalar]),
            };
        }
    };

    let serialized = serde_json::to_vec(&value).expect("Failed to serialize arbitrary value");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(serde_json::Number::from(u.arbitrary::<i64>()?)),
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

/// Reads every value of an accepted document through the public accessors.
fn walk(value: &LazyValue<'_>) {
    match value {
        LazyValue::Array(array) => {
            let mut count = 0;
            for item in array {
                walk(&item.expect("element of an accepted array"));
                count += 1;
            }
            assert_eq!(count, array.len());
            for i in 0..count {
                array.kind(i).expect("kind of an element below len");
            }
            assert!(array.get(count).is_err());
        }
        LazyValue::Object(object) => {
            for entry in object.entries() {
                let (key, item) = entry.expect("member of an accepted object");
                assert!(object.has(&key), "lookup misses key {key:?}");
                walk(&item);
            }
        }
        LazyValue::Number(number) => {
            let _ = number.as_i32();
            let _ = number.as_i64();
            let _ = number.as_f64();
        }
        LazyValue::String(_) | LazyValue::Bool(_) | LazyValue::Null => {}
    }
}

fn parser(data: &[u8]) {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let options = ParserOptions {
        max_depth: MAX_DEPTH,
        allow_leading_zeros: flags & 1 != 0,
        allow_trailing_data: flags & 2 != 0,
    };
    let result = lazyjson::parse_with(text, &options);
    if let Ok(value) = &result {
        assert!(matches!(value, LazyValue::Array(_) | LazyValue::Object(_)));
        walk(value);
    }

    if flags & 3 != 0 {
        return;
    }
    let oracle = serde_json::from_str::<Value>(text);
    match (&result, &oracle) {
        (Err(err), _) if matches!(err.kind(), ErrorKind::DepthExceeded { .. }) => {}
        // serde_json rejects numbers beyond f64 range; they are valid JSON.
        (_, Err(err)) if err.to_string().starts_with("number out of range") => {}
        (Ok(_), Ok(value)) => assert!(value.is_array() || value.is_object()),
        (Ok(_), Err(err)) => panic!("accepted invalid document {text:?}: {err}"),
        (Err(err), Ok(value)) => assert!(
            !(value.is_array() || value.is_object()),
            "rejected valid document {text:?}: {err}"
        ),
        (Err(_), Err(_)) => {}
    }
}

fuzz_target!(|data: &[u8]| parser(data));
