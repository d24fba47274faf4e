use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::value::ValueKind;

/// Error returned by parsing and by every view accessor.
///
/// Displays as `"<offset>:<message>"` when a byte offset into the source is
/// known and as `"<message>"` otherwise.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}{}", OffsetPrefix(.offset), .kind)]
pub struct LazyError {
    kind: ErrorKind,
    offset: Option<usize>,
}

impl LazyError {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self { kind, offset: None }
    }

    pub(crate) fn at(kind: impl Into<ErrorKind>, offset: usize) -> Self {
        Self {
            kind: kind.into(),
            offset: Some(offset),
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset into the source text, if the failure has a location.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// Returns `true` for malformed-document errors, including depth limits.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::Syntax(_) | ErrorKind::DepthExceeded { .. })
    }
}

struct OffsetPrefix<'a>(&'a Option<usize>);

impl fmt::Display for OffsetPrefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(offset) => write!(f, "{offset}:"),
            None => Ok(()),
        }
    }
}

/// The category of a [`LazyError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The document is not well-formed JSON.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// The document nests more containers than the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded {
        /// The configured `max_depth`.
        limit: usize,
    },
    /// An accessor asked for a different kind than the value holds.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind the accessor converts to.
        expected: ValueKind,
        /// Kind of the stored value.
        found: ValueKind,
    },
    /// An array index at or past the array length.
    #[error("index {index} out of range for array of length {length}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Array length.
        length: usize,
    },
    /// No field with the requested name.
    #[error("unknown field '{0}'")]
    UnknownField(String),
    /// A number that does not fit the requested numeric type.
    #[error("number {text} does not fit in {target}")]
    NumericOverflow {
        /// Requested type, e.g. `i32`.
        target: &'static str,
        /// The number as written in the source.
        text: String,
    },
    /// A number that is valid JSON but not a valid literal for the requested type.
    #[error("number {text} is not a valid {target}")]
    NumericFormat {
        /// Requested type, e.g. `i64`.
        target: &'static str,
        /// The number as written in the source.
        text: String,
    },
}

/// What the tokenizer saw at an error offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    /// A character.
    Char(char),
    /// The source ended.
    EndOfInput,
}

impl Found {
    pub(crate) fn at(bytes: &[u8], pos: usize) -> Self {
        match bytes.get(pos..) {
            Some(rest) if !rest.is_empty() => match bstr::decode_utf8(rest) {
                (Some(c), _) => Found::Char(c),
                (None, _) => Found::Char(char::REPLACEMENT_CHARACTER),
            },
            _ => Found::EndOfInput,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(c) => write!(f, "{c:?}"),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Ways a document can violate the JSON grammar.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A construct other than the one the grammar requires here.
    #[error("expected {expected}, found {found}")]
    Expected {
        /// Description of what was allowed.
        expected: &'static str,
        /// What the source held instead.
        found: Found,
    },
    /// `}` while the innermost open container is not an object.
    #[error("unexpected end of object")]
    UnexpectedEndOfObject,
    /// `]` while the innermost open container is not an array.
    #[error("unexpected end of array")]
    UnexpectedEndOfArray,
    /// A sign, decimal point or exponent sign not followed by a digit.
    #[error("digit expected, found {found}")]
    DigitExpected {
        /// What followed instead.
        found: Found,
    },
    /// `e` or `E` not followed by a sign or digit.
    #[error("exponent part expected, found {found}")]
    ExponentExpected {
        /// What followed instead.
        found: Found,
    },
    /// A number such as `007`.
    #[error("leading zeros are not allowed, found {found} after '0'")]
    LeadingZero {
        /// The digit after the zero.
        found: Found,
    },
    /// A misspelled `null`, `true` or `false`.
    #[error("invalid literal, expected '{literal}', found {found}")]
    InvalidLiteral {
        /// The literal being matched.
        literal: &'static str,
        /// The mismatching character.
        found: Found,
    },
    /// A backslash followed by something other than a JSON escape.
    #[error("invalid escape sequence, found {found} after '\\'")]
    InvalidEscape {
        /// The character after the backslash.
        found: Found,
    },
    /// A `\u` escape without four hexadecimal digits.
    #[error("expected hexadecimal digit in unicode escape, found {found}")]
    InvalidUnicodeEscape {
        /// The non-hex character.
        found: Found,
    },
    /// A surrogate `\u` escape that is not part of a valid pair.
    #[error("unpaired surrogate \\u{0:04X} in unicode escape")]
    LoneSurrogate(u32),
    /// A raw control character inside a string.
    #[error("unescaped control character 0x{0:02X} in string")]
    ControlCharacter(u8),
    /// Non-whitespace after the root container closed.
    #[error("unexpected trailing {found} after document")]
    TrailingCharacters {
        /// The first trailing character.
        found: Found,
    },
    /// A token tree that breaks its structural invariants, such as an object
    /// member that is not a field. Indicates a tokenizer defect.
    #[error("corrupt token tree: {0}")]
    CorruptTree(&'static str),
}
