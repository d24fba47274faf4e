#![allow(missing_docs)]
#![allow(dead_code)]

/// Number of entries in the `samples` array; entry `i` holds `i * i`.
pub const SAMPLE_COUNT: usize = 40;

pub const NESTED_DOCUMENT: &str = r#"
{
    "service": {
        "name": "ingest",
        "owner": null,
        "replicas": 3,
        "load_factor": 0.75,
        "limits": { "max_body": 1048576, "burst": 2147483648 }
    },
    "caf\u00e9": "menu",
    "tab\tkey": true,
    "say \"hi\"": "quoted",
    "settings": { "mode": "first", "retries": 2, "mode": "second" },
    "samples": [0, 1, 4, 9, 16, 25, 36, 49, 64, 81, 100, 121, 144, 169, 196, 225, 256, 289, 324, 361, 400, 441, 484, 529, 576, 625, 676, 729, 784, 841, 900, 961, 1024, 1089, 1156, 1225, 1296, 1369, 1444, 1521],
    "events": [
        { "kind": "start", "at": 0 },
        { "kind": "tick", "at": 15 },
        { "kind": "stop", "at": 30 }
    ],
    "grid": [[1, 2], [3, 4], []],
    "mixed": ["s", { "k": "v" }, -2.5e3, [null], false],
    "empty": {}
}"#;
