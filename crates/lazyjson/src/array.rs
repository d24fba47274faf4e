use alloc::{borrow::Cow, boxed::Box, sync::Arc};
use core::{cell::OnceCell, fmt, str::FromStr};

use tracing::trace;

use crate::{
    access,
    error::{ErrorKind, Found, LazyError, SyntaxError},
    object::LazyObject,
    options::ParserOptions,
    parser,
    token::{Children, Document, ROOT, TokenId, TokenKind},
    value::{LazyValue, ValueKind},
};

/// A read-only view of a JSON array.
///
/// Elements are located through a table of child tokens that is built on the
/// first indexed access, so any access pattern costs O(1) per lookup after a
/// single O(n) walk. Values are converted only when an accessor asks for
/// them.
///
/// ```rust
/// use lazyjson::LazyArray;
///
/// let array = LazyArray::parse(r#"[1, "two", null, [3]]"#)?;
/// assert_eq!(array.len(), 4);
/// assert_eq!(array.get_int(0)?, 1);
/// assert_eq!(array.get_string(1)?, "two");
/// assert!(array.is_null(2)?);
/// assert_eq!(array.get_array(3)?.get_long(0)?, 3);
/// # Ok::<(), lazyjson::LazyError>(())
/// ```
#[derive(Clone)]
pub struct LazyArray {
    doc: Arc<Document>,
    root: TokenId,
    length: OnceCell<usize>,
    index: OnceCell<Box<[TokenId]>>,
}

impl LazyArray {
    pub(crate) fn new(doc: Arc<Document>, root: TokenId) -> Self {
        debug_assert_eq!(doc.token(root).kind(), TokenKind::Array);
        Self {
            doc,
            root,
            length: OnceCell::new(),
            index: OnceCell::new(),
        }
    }

    /// Parses `text`, which must hold a JSON array.
    ///
    /// # Errors
    ///
    /// A syntax error if `text` is malformed or its root is not an array.
    pub fn parse(text: &str) -> Result<Self, LazyError> {
        Self::parse_with(text, &ParserOptions::default())
    }

    /// Parses `text` with explicit options.
    ///
    /// # Errors
    ///
    /// See [`LazyArray::parse`].
    pub fn parse_with(text: &str, options: &ParserOptions) -> Result<Self, LazyError> {
        let doc = parser::tokenize(text, options)?;
        let root = doc.token(ROOT);
        if root.kind() != TokenKind::Array {
            return Err(LazyError::at(
                SyntaxError::Expected {
                    expected: "'[' at the start of an array",
                    found: Found::at(text.as_bytes(), root.start),
                },
                root.start,
            ));
        }
        Ok(Self::new(Arc::new(doc), ROOT))
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        *self.length.get_or_init(|| match self.index.get() {
            Some(index) => index.len(),
            None => self.doc.children(self.root).count(),
        })
    }

    /// Returns `true` if the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc.token(self.root).first_child.is_none()
    }

    fn value_token(&self, index: usize) -> Result<TokenId, LazyError> {
        let table = self.index.get_or_init(|| {
            let table: Box<[TokenId]> = self.doc.children(self.root).collect();
            trace!(length = table.len(), "built array index table");
            table
        });
        table.get(index).copied().ok_or_else(|| {
            LazyError::new(ErrorKind::IndexOutOfRange {
                index,
                length: table.len(),
            })
        })
    }

    /// The array at `index`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IndexOutOfRange`] past the end, [`ErrorKind::TypeMismatch`]
    /// if the element is not an array.
    pub fn get_array(&self, index: usize) -> Result<LazyArray, LazyError> {
        access::array(&self.doc, self.value_token(index)?)
    }

    /// The object at `index`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IndexOutOfRange`] past the end, [`ErrorKind::TypeMismatch`]
    /// if the element is not an object.
    pub fn get_object(&self, index: usize) -> Result<LazyObject, LazyError> {
        access::object(&self.doc, self.value_token(index)?)
    }

    /// The string at `index`, borrowed from the source unless it contains
    /// escapes.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IndexOutOfRange`] past the end, [`ErrorKind::TypeMismatch`]
    /// if the element is not a string.
    pub fn get_string(&self, index: usize) -> Result<Cow<'_, str>, LazyError> {
        access::string(&self.doc, self.value_token(index)?)
    }

    /// The number at `index` as an `i32`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IndexOutOfRange`], [`ErrorKind::TypeMismatch`], or a
    /// numeric conversion error.
    pub fn get_int(&self, index: usize) -> Result<i32, LazyError> {
        access::number(&self.doc, self.value_token(index)?)?.as_i32()
    }

    /// The number at `index` as an `i64`.
    ///
    /// # Errors
    ///
    /// See [`LazyArray::get_int`].
    pub fn get_long(&self, index: usize) -> Result<i64, LazyError> {
        access::number(&self.doc, self.value_token(index)?)?.as_i64()
    }

    /// The number at `index` as an `f64`.
    ///
    /// # Errors
    ///
    /// See [`LazyArray::get_int`].
    pub fn get_double(&self, index: usize) -> Result<f64, LazyError> {
        access::number(&self.doc, self.value_token(index)?)?.as_f64()
    }

    /// The boolean at `index`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IndexOutOfRange`] past the end, [`ErrorKind::TypeMismatch`]
    /// if the element is not `true` or `false`.
    pub fn get_boolean(&self, index: usize) -> Result<bool, LazyError> {
        access::boolean(&self.doc, self.value_token(index)?)
    }

    /// Whether the element at `index` is `null`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IndexOutOfRange`] past the end.
    pub fn is_null(&self, index: usize) -> Result<bool, LazyError> {
        access::is_null(&self.doc, self.value_token(index)?)
    }

    /// The element at `index`, whatever its kind.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IndexOutOfRange`] past the end.
    pub fn get(&self, index: usize) -> Result<LazyValue<'_>, LazyError> {
        access::value(&self.doc, self.value_token(index)?)
    }

    /// The kind of the element at `index`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IndexOutOfRange`] past the end.
    pub fn kind(&self, index: usize) -> Result<ValueKind, LazyError> {
        access::kind_of(&self.doc, self.value_token(index)?)
    }

    /// Iterates over the elements in order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            doc: &self.doc,
            children: self.doc.children(self.root),
        }
    }

    /// The array exactly as written in the source, brackets included.
    #[must_use]
    pub fn as_raw(&self) -> &str {
        self.doc.raw(self.root)
    }
}

impl fmt::Display for LazyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_raw())
    }
}

impl fmt::Debug for LazyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LazyArray").field(&self.as_raw()).finish()
    }
}

impl FromStr for LazyArray {
    type Err = LazyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a LazyArray {
    type Item = Result<LazyValue<'a>, LazyError>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the elements of a [`LazyArray`], created by
/// [`LazyArray::iter`].
pub struct Iter<'a> {
    doc: &'a Arc<Document>,
    children: Children<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Result<LazyValue<'a>, LazyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.children.next()?;
        Some(access::value(self.doc, id))
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;

    #[test]
    fn length_is_cached_and_consistent() {
        let array = LazyArray::parse("[1, [2, 3], {}, \"x\"]").unwrap();
        assert_eq!(array.len(), 4);
        assert_eq!(array.len(), 4);
        assert!(!array.is_empty());
        assert!(LazyArray::parse("[ ]").unwrap().is_empty());
    }

    #[test]
    fn index_out_of_range() {
        let array = LazyArray::parse("[true]").unwrap();
        assert!(array.get_boolean(0).unwrap());
        let err = array.get_boolean(1).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::IndexOutOfRange { index: 1, length: 1 }
        );
        assert_eq!(err.to_string(), "index 1 out of range for array of length 1");
        assert_eq!(err.offset(), None);
    }

    #[test]
    fn type_mismatch_reports_position() {
        let array = LazyArray::parse(r#"[1, "s"]"#).unwrap();
        let err = array.get_int(1).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::TypeMismatch {
                expected: ValueKind::Number,
                found: ValueKind::String
            }
        );
        assert_eq!(err.offset(), Some(5));
        // The view stays usable after a failed access.
        assert_eq!(array.get_int(0).unwrap(), 1);
    }

    #[test]
    fn rejects_object_root() {
        let err = LazyArray::parse("  {}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "2:syntax error: expected '[' at the start of an array, found '{'"
        );
    }

    #[test]
    fn iterates_in_order() {
        let array = LazyArray::parse(r#"[null, false, 2.5, "s", [], {}]"#).unwrap();
        let kinds: Vec<ValueKind> = array.iter().map(|v| v.unwrap().kind()).collect();
        assert_eq!(
            kinds,
            [
                ValueKind::Null,
                ValueKind::Boolean,
                ValueKind::Number,
                ValueKind::String,
                ValueKind::Array,
                ValueKind::Object
            ]
        );
        assert_eq!((&array).into_iter().count(), array.len());
    }

    #[test]
    fn nested_views_share_the_document() {
        let array = LazyArray::parse("[[1, [2]]]").unwrap();
        let inner = array.get_array(0).unwrap();
        let innermost = inner.get_array(1).unwrap();
        drop(array);
        drop(inner);
        assert_eq!(innermost.as_raw(), "[2]");
        assert_eq!(innermost.get_int(0).unwrap(), 2);
    }

    #[test]
    fn display_is_verbatim() {
        let text = "[1,  2 ,\n3]";
        let array = LazyArray::parse(text).unwrap();
        assert_eq!(array.to_string(), text);
        assert_eq!(alloc::format!("{array:?}"), "LazyArray(\"[1,  2 ,\\n3]\")");
    }
}
