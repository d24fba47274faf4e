use alloc::{borrow::Cow, string::ToString, sync::Arc};
use core::{cell::OnceCell, fmt, str::FromStr};

use crate::{
    access,
    array::LazyArray,
    error::{ErrorKind, Found, LazyError, SyntaxError},
    options::ParserOptions,
    parser,
    token::{Children, Document, ROOT, TokenId, TokenKind},
    value::{LazyValue, ValueKind},
};

/// A read-only view of a JSON object.
///
/// Fields are found by walking the object's members and comparing names
/// against the raw source, so a lookup allocates nothing even when the name
/// was written with escapes. If a name occurs more than once, the first
/// occurrence wins.
///
/// ```rust
/// use lazyjson::LazyObject;
///
/// let object = LazyObject::parse(r#"{"id": 7, "tags": ["a"], "note": null}"#)?;
/// assert_eq!(object.get_int("id")?, 7);
/// assert_eq!(object.get_array("tags")?.get_string(0)?, "a");
/// assert!(object.is_null("note")?);
/// assert!(!object.has("missing"));
/// # Ok::<(), lazyjson::LazyError>(())
/// ```
#[derive(Clone)]
pub struct LazyObject {
    doc: Arc<Document>,
    root: TokenId,
    length: OnceCell<usize>,
}

impl LazyObject {
    pub(crate) fn new(doc: Arc<Document>, root: TokenId) -> Self {
        debug_assert_eq!(doc.token(root).kind(), TokenKind::Object);
        Self {
            doc,
            root,
            length: OnceCell::new(),
        }
    }

    /// Parses `text`, which must hold a JSON object.
    ///
    /// # Errors
    ///
    /// A syntax error if `text` is malformed or its root is not an object.
    pub fn parse(text: &str) -> Result<Self, LazyError> {
        Self::parse_with(text, &ParserOptions::default())
    }

    /// Parses `text` with explicit options.
    ///
    /// # Errors
    ///
    /// See [`LazyObject::parse`].
    pub fn parse_with(text: &str, options: &ParserOptions) -> Result<Self, LazyError> {
        let doc = parser::tokenize(text, options)?;
        let root = doc.token(ROOT);
        if root.kind() != TokenKind::Object {
            return Err(LazyError::at(
                SyntaxError::Expected {
                    expected: "'{' at the start of an object",
                    found: Found::at(text.as_bytes(), root.start),
                },
                root.start,
            ));
        }
        Ok(Self::new(Arc::new(doc), ROOT))
    }

    /// Number of members, counting repeated names separately.
    #[must_use]
    pub fn len(&self) -> usize {
        *self
            .length
            .get_or_init(|| self.doc.children(self.root).count())
    }

    /// Returns `true` if the object has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc.token(self.root).first_child.is_none()
    }

    fn find(&self, key: &str) -> Result<Option<TokenId>, LazyError> {
        for field in self.doc.children(self.root) {
            if self.doc.token(field).kind() != TokenKind::Field {
                return Err(access::corrupt(&self.doc, field, "object member is not a field"));
            }
            if self.doc.key_eq(field, key) {
                return self.doc.token(field).first_child.map(Some).ok_or_else(|| {
                    access::corrupt(&self.doc, field, "field without a value")
                });
            }
        }
        Ok(None)
    }

    fn field_value(&self, key: &str) -> Result<TokenId, LazyError> {
        self.find(key)?
            .ok_or_else(|| LazyError::new(ErrorKind::UnknownField(key.to_string())))
    }

    /// Returns `true` if a field named `key` exists, whatever its value.
    ///
    /// A corrupt token tree reads as absent here; use
    /// [`LazyObject::contains`] to see the error.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.contains(key).unwrap_or(false)
    }

    /// Like [`LazyObject::has`], but reports a broken token tree.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::CorruptTree`] if a member scanned before the match is
    /// not a field, or the matching field has no value.
    pub fn contains(&self, key: &str) -> Result<bool, LazyError> {
        Ok(self.find(key)?.is_some())
    }

    /// The array stored under `key`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnknownField`] if there is no such field,
    /// [`ErrorKind::TypeMismatch`] if its value is not an array.
    pub fn get_array(&self, key: &str) -> Result<LazyArray, LazyError> {
        access::array(&self.doc, self.field_value(key)?)
    }

    /// The object stored under `key`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnknownField`] if there is no such field,
    /// [`ErrorKind::TypeMismatch`] if its value is not an object.
    pub fn get_object(&self, key: &str) -> Result<LazyObject, LazyError> {
        access::object(&self.doc, self.field_value(key)?)
    }

    /// The string stored under `key`, borrowed from the source unless it
    /// contains escapes.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnknownField`] if there is no such field,
    /// [`ErrorKind::TypeMismatch`] if its value is not a string.
    pub fn get_string(&self, key: &str) -> Result<Cow<'_, str>, LazyError> {
        access::string(&self.doc, self.field_value(key)?)
    }

    /// The number stored under `key` as an `i32`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnknownField`], [`ErrorKind::TypeMismatch`], or a numeric
    /// conversion error.
    pub fn get_int(&self, key: &str) -> Result<i32, LazyError> {
        access::number(&self.doc, self.field_value(key)?)?.as_i32()
    }

    /// The number stored under `key` as an `i64`.
    ///
    /// # Errors
    ///
    /// See [`LazyObject::get_int`].
    pub fn get_long(&self, key: &str) -> Result<i64, LazyError> {
        access::number(&self.doc, self.field_value(key)?)?.as_i64()
    }

    /// The number stored under `key` as an `f64`.
    ///
    /// # Errors
    ///
    /// See [`LazyObject::get_int`].
    pub fn get_double(&self, key: &str) -> Result<f64, LazyError> {
        access::number(&self.doc, self.field_value(key)?)?.as_f64()
    }

    /// The boolean stored under `key`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnknownField`] if there is no such field,
    /// [`ErrorKind::TypeMismatch`] if its value is not `true` or `false`.
    pub fn get_boolean(&self, key: &str) -> Result<bool, LazyError> {
        access::boolean(&self.doc, self.field_value(key)?)
    }

    /// Whether the value stored under `key` is `null`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnknownField`] if there is no such field.
    pub fn is_null(&self, key: &str) -> Result<bool, LazyError> {
        access::is_null(&self.doc, self.field_value(key)?)
    }

    /// The value stored under `key`, whatever its kind.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnknownField`] if there is no such field.
    pub fn get(&self, key: &str) -> Result<LazyValue<'_>, LazyError> {
        access::value(&self.doc, self.field_value(key)?)
    }

    /// The kind of the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnknownField`] if there is no such field.
    pub fn kind(&self, key: &str) -> Result<ValueKind, LazyError> {
        access::kind_of(&self.doc, self.field_value(key)?)
    }

    /// Field names in source order, decoded.
    #[must_use]
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            doc: &self.doc,
            fields: self.doc.children(self.root),
        }
    }

    /// Name and value pairs in source order.
    #[must_use]
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            doc: &self.doc,
            fields: self.doc.children(self.root),
        }
    }

    /// The object exactly as written in the source, braces included.
    #[must_use]
    pub fn as_raw(&self) -> &str {
        self.doc.raw(self.root)
    }
}

impl fmt::Display for LazyObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_raw())
    }
}

impl fmt::Debug for LazyObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LazyObject").field(&self.as_raw()).finish()
    }
}

impl FromStr for LazyObject {
    type Err = LazyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn field_token(doc: &Document, id: TokenId) -> Result<TokenId, LazyError> {
    if doc.token(id).kind() != TokenKind::Field {
        return Err(access::corrupt(doc, id, "object member is not a field"));
    }
    Ok(id)
}

/// Iterator over the field names of a [`LazyObject`], created by
/// [`LazyObject::keys`].
pub struct Keys<'a> {
    doc: &'a Arc<Document>,
    fields: Children<'a>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = Result<Cow<'a, str>, LazyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let doc: &'a Arc<Document> = self.doc;
        let id = self.fields.next()?;
        Some(field_token(doc, id).map(|field| doc.text(field)))
    }
}

/// Iterator over the members of a [`LazyObject`], created by
/// [`LazyObject::entries`].
pub struct Entries<'a> {
    doc: &'a Arc<Document>,
    fields: Children<'a>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<(Cow<'a, str>, LazyValue<'a>), LazyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.fields.next()?;
        Some(self.entry(id))
    }
}

impl<'a> Entries<'a> {
    fn entry(&self, id: TokenId) -> Result<(Cow<'a, str>, LazyValue<'a>), LazyError> {
        let doc: &'a Arc<Document> = self.doc;
        let field = field_token(doc, id)?;
        let value = doc
            .token(field)
            .first_child
            .ok_or_else(|| access::corrupt(doc, field, "field without a value"))?;
        Ok((doc.text(field), access::value(doc, value)?))
    }
}
