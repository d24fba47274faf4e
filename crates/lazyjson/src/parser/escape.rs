//! Escape handling for JSON strings.
//!
//! The tokenizer only validates escapes ([`scan_escape`]) and flags the
//! token; decoding happens later, on access, through [`Unescape`]. Because
//! every escape was validated during the scan, decoding cannot fail.

use crate::error::{Found, LazyError, SyntaxError};

const HIGH_SURROGATES: core::ops::Range<u32> = 0xD800..0xDC00;
const LOW_SURROGATES: core::ops::Range<u32> = 0xDC00..0xE000;

/// Convert a single ASCII hex digit into its 0..=15 value.
#[inline]
fn hex_val(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}

/// Reads the four hex digits of a `\u` escape starting at `start`.
fn hex4(bytes: &[u8], start: usize) -> Result<u32, LazyError> {
    let mut acc = 0;
    for at in start..start + 4 {
        let digit = bytes.get(at).copied().and_then(hex_val).ok_or_else(|| {
            LazyError::at(
                SyntaxError::InvalidUnicodeEscape {
                    found: Found::at(bytes, at),
                },
                at,
            )
        })?;
        acc = (acc << 4) | digit;
    }
    Ok(acc)
}

/// Validates the escape whose backslash sits at `pos` and returns the offset
/// just past it. A high surrogate must be immediately followed by an escaped
/// low surrogate.
pub(crate) fn scan_escape(bytes: &[u8], pos: usize) -> Result<usize, LazyError> {
    let at = pos + 1;
    match bytes.get(at) {
        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Ok(at + 1),
        Some(b'u') => {
            let unit = hex4(bytes, at + 1)?;
            let end = at + 5;
            let lone = || LazyError::at(SyntaxError::LoneSurrogate(unit), pos);
            if LOW_SURROGATES.contains(&unit) {
                return Err(lone());
            }
            if !HIGH_SURROGATES.contains(&unit) {
                return Ok(end);
            }
            if bytes.get(end..end + 2) != Some(b"\\u".as_slice()) {
                return Err(lone());
            }
            let low = hex4(bytes, end + 2)?;
            if LOW_SURROGATES.contains(&low) {
                Ok(end + 6)
            } else {
                Err(lone())
            }
        }
        _ => Err(LazyError::at(
            SyntaxError::InvalidEscape {
                found: Found::at(bytes, at),
            },
            at,
        )),
    }
}

/// Decodes the raw content of a validated JSON string, one `char` at a time.
#[derive(Debug, Clone)]
pub(crate) struct Unescape<'a> {
    rest: &'a str,
}

impl<'a> Unescape<'a> {
    pub(crate) fn new(raw: &'a str) -> Self {
        Self { rest: raw }
    }

    fn take_hex4(&mut self) -> Option<u32> {
        let digits = self.rest.get(..4)?;
        let unit = u32::from_str_radix(digits, 16).ok()?;
        self.rest = &self.rest[4..];
        Some(unit)
    }

    fn unicode(&mut self) -> char {
        let Some(unit) = self.take_hex4() else {
            return char::REPLACEMENT_CHARACTER;
        };
        if !HIGH_SURROGATES.contains(&unit) {
            return char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER);
        }
        let saved = self.rest;
        if let Some(rest) = self.rest.strip_prefix("\\u") {
            self.rest = rest;
            if let Some(low) = self.take_hex4() {
                if LOW_SURROGATES.contains(&low) {
                    let code = 0x1_0000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                }
            }
        }
        self.rest = saved;
        char::REPLACEMENT_CHARACTER
    }
}

impl Iterator for Unescape<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let c = chars.next()?;
        if c != '\\' {
            self.rest = chars.as_str();
            return Some(c);
        }
        let escape = chars.next();
        self.rest = chars.as_str();
        Some(match escape {
            Some('b') => '\u{0008}',
            Some('f') => '\u{000C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => self.unicode(),
            // `"`, `\` and `/` stand for themselves
            Some(other) => other,
            None => '\\',
        })
    }
}
