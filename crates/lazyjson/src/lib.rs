//! Index-overlay JSON parsing with lazy, on-demand value access.
//!
//! A document is scanned exactly once. The scan validates the JSON grammar and
//! records a tree of lightweight tokens (a kind tag and a byte span into the
//! source) without decoding any value. [`LazyObject`] and [`LazyArray`] wrap
//! that tree and convert values only when an accessor asks for them.
//!
//! ```rust
//! use lazyjson::LazyObject;
//!
//! let doc: LazyObject = r#"{"a":[1,2,{"b":true}],"name":"x\"y"}"#.parse()?;
//! assert!(doc.get_array("a")?.get_object(2)?.get_boolean("b")?);
//! assert_eq!(doc.get_string("name")?, "x\"y");
//! # Ok::<(), lazyjson::LazyError>(())
//! ```
//!
//! Views are cheap to clone and share the parsed document. Their caches are
//! not synchronized, so a view is `Send` but not `Sync`; clone it to hand a
//! copy to another thread.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod access;
mod array;
mod error;
mod object;
mod options;
mod parser;
mod token;
mod value;

#[cfg(test)]
mod tests;

pub use array::{Iter, LazyArray};
pub use error::{ErrorKind, Found, LazyError, SyntaxError};
pub use object::{Entries, Keys, LazyObject};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};
pub use value::{LazyValue, Number, ValueKind};

/// Parses a JSON object or array with the default [`ParserOptions`].
///
/// The returned value is always [`LazyValue::Object`] or
/// [`LazyValue::Array`].
///
/// # Errors
///
/// Returns a syntax error if `text` is not a single well-formed JSON object or
/// array, or [`ErrorKind::DepthExceeded`] if it nests too deeply.
pub fn parse(text: &str) -> Result<LazyValue<'static>, LazyError> {
    parse_with(text, &ParserOptions::default())
}

/// Parses a JSON object or array with explicit options.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with(text: &str, options: &ParserOptions) -> Result<LazyValue<'static>, LazyError> {
    let doc = alloc::sync::Arc::new(parser::tokenize(text, options)?);
    Ok(match doc.token(token::ROOT).kind() {
        token::TokenKind::Object => LazyValue::Object(LazyObject::new(doc, token::ROOT)),
        _ => LazyValue::Array(LazyArray::new(doc, token::ROOT)),
    })
}
