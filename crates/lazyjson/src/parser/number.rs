//! Inline validation of the JSON number grammar.
//!
//! ```text
//! number = [ "-" ] int [ "." 1*DIGIT ] [ ( "e" / "E" ) [ "+" / "-" ] 1*DIGIT ]
//! int    = "0" / ( %x31-39 *DIGIT )
//! ```
//!
//! No value is computed here; conversion happens on access.

use crate::error::{Found, LazyError, SyntaxError};

#[inline]
fn digit_at(bytes: &[u8], at: usize) -> bool {
    bytes.get(at).is_some_and(u8::is_ascii_digit)
}

#[inline]
fn skip_digits(bytes: &[u8], mut at: usize) -> usize {
    while digit_at(bytes, at) {
        at += 1;
    }
    at
}

fn digit_expected(bytes: &[u8], at: usize) -> LazyError {
    LazyError::at(
        SyntaxError::DigitExpected {
            found: Found::at(bytes, at),
        },
        at,
    )
}

/// Validates the number starting at `start` (a `-` or a digit) and returns
/// the offset just past it.
pub(crate) fn scan_number(bytes: &[u8], start: usize, allow_leading_zeros: bool) -> Result<usize, LazyError> {
    let mut pos = start;
    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }
    if !digit_at(bytes, pos) {
        return Err(digit_expected(bytes, pos));
    }
    if bytes.get(pos) == Some(&b'0') {
        pos += 1;
        if digit_at(bytes, pos) {
            if !allow_leading_zeros {
                return Err(LazyError::at(
                    SyntaxError::LeadingZero {
                        found: Found::at(bytes, pos),
                    },
                    pos,
                ));
            }
            pos = skip_digits(bytes, pos);
        }
    } else {
        pos = skip_digits(bytes, pos);
    }

    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        if !digit_at(bytes, pos) {
            return Err(digit_expected(bytes, pos));
        }
        pos = skip_digits(bytes, pos);
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
            if !digit_at(bytes, pos) {
                return Err(digit_expected(bytes, pos));
            }
        } else if !digit_at(bytes, pos) {
            return Err(LazyError::at(
                SyntaxError::ExponentExpected {
                    found: Found::at(bytes, pos),
                },
                pos,
            ));
        }
        pos = skip_digits(bytes, pos);
    }
    Ok(pos)
}
