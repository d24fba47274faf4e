use alloc::{borrow::Cow, string::ToString};
use core::{fmt, num::IntErrorKind, str::FromStr};

use crate::{
    array::LazyArray,
    error::{ErrorKind, LazyError},
    object::LazyObject,
};

/// The kind of a JSON value, as recorded by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean,
    /// Any JSON number.
    Number,
    /// A string.
    String,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

/// A number as written in the source, converted only on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Number<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Number<'a> {
    pub(crate) fn new(text: &'a str, offset: usize) -> Self {
        Self { text, offset }
    }

    /// The number's source text, e.g. `-0.5e+2`.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Converts to `i32`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::NumericOverflow`] if the value is out of range,
    /// [`ErrorKind::NumericFormat`] if it has a fraction or exponent.
    pub fn as_i32(&self) -> Result<i32, LazyError> {
        self.integer("i32")
    }

    /// Converts to `i64`.
    ///
    /// # Errors
    ///
    /// See [`Number::as_i32`].
    pub fn as_i64(&self) -> Result<i64, LazyError> {
        self.integer("i64")
    }

    /// Converts to `f64`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::NumericOverflow`] if the magnitude is too large to be
    /// finite.
    pub fn as_f64(&self) -> Result<f64, LazyError> {
        match f64::from_str(self.text) {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(self.error(true, "f64")),
            Err(_) => Err(self.error(false, "f64")),
        }
    }

    fn integer<T>(&self, target: &'static str) -> Result<T, LazyError>
    where
        T: FromStr<Err = core::num::ParseIntError>,
    {
        self.text.parse::<T>().map_err(|err| {
            let overflow = matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow);
            self.error(overflow, target)
        })
    }

    fn error(&self, overflow: bool, target: &'static str) -> LazyError {
        let text = self.text.to_string();
        let kind = if overflow {
            ErrorKind::NumericOverflow { target, text }
        } else {
            ErrorKind::NumericFormat { target, text }
        };
        LazyError::at(kind, self.offset)
    }
}

impl fmt::Display for Number<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// A value read without a target type, borrowing scalars from its view.
#[derive(Debug, Clone)]
pub enum LazyValue<'a> {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number, still in textual form.
    Number(Number<'a>),
    /// A string, borrowed from the source when it has no escapes.
    String(Cow<'a, str>),
    /// A nested array sharing the parsed document.
    Array(LazyArray),
    /// A nested object sharing the parsed document.
    Object(LazyObject),
}

impl LazyValue<'_> {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            LazyValue::Null => ValueKind::Null,
            LazyValue::Bool(_) => ValueKind::Boolean,
            LazyValue::Number(_) => ValueKind::Number,
            LazyValue::String(_) => ValueKind::String,
            LazyValue::Array(_) => ValueKind::Array,
            LazyValue::Object(_) => ValueKind::Object,
        }
    }

    /// Returns the object, if this is one.
    #[must_use]
    pub fn into_object(self) -> Option<LazyObject> {
        match self {
            LazyValue::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the array, if this is one.
    #[must_use]
    pub fn into_array(self) -> Option<LazyArray> {
        match self {
            LazyValue::Array(array) => Some(array),
            _ => None,
        }
    }
}
