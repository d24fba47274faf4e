//! Index-overlay tokens and the document that owns them.
//!
//! A token never holds decoded data: it records a kind and a byte span into
//! the shared source. Children form singly linked lists (`first_child`,
//! `next_sibling`) stored as ids into the document's token arena, so the tree
//! can be built in one forward pass with O(1) appends and then shared
//! immutably by any number of views.

use alloc::{borrow::Cow, boxed::Box, string::String, vec::Vec};

use crate::{parser::escape::Unescape, value::ValueKind};

/// Position of a token in the document's arena.
pub(crate) type TokenId = usize;

/// The root container is always the first token created.
pub(crate) const ROOT: TokenId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Object,
    Array,
    /// One object member. Its span is the key; its single child is the value.
    Field,
    String,
    Number,
    Null,
    True,
    False,
}

impl TokenKind {
    /// The value kind a token of this kind represents, `None` for fields.
    pub(crate) fn value_kind(self) -> Option<ValueKind> {
        Some(match self {
            TokenKind::Object => ValueKind::Object,
            TokenKind::Array => ValueKind::Array,
            TokenKind::Field => return None,
            TokenKind::String => ValueKind::String,
            TokenKind::Number => ValueKind::Number,
            TokenKind::Null => ValueKind::Null,
            TokenKind::True | TokenKind::False => ValueKind::Boolean,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) start: usize,
    /// Exclusive. For containers this is one past the closing delimiter and
    /// is only meaningful once the container has been closed.
    pub(crate) end: usize,
    /// The raw span contains at least one backslash escape.
    pub(crate) escaped: bool,
    pub(crate) first_child: Option<TokenId>,
    pub(crate) next_sibling: Option<TokenId>,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            escaped: false,
            first_child: None,
            next_sibling: None,
        }
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.kind
    }
}

/// The shared source text together with its token tree.
#[derive(Debug)]
pub(crate) struct Document {
    source: Box<str>,
    tokens: Vec<Token>,
}

impl Document {
    pub(crate) fn new(source: Box<str>, tokens: Vec<Token>) -> Self {
        debug_assert!(!tokens.is_empty(), "a document always has a root token");
        Self { source, tokens }
    }

    #[inline]
    pub(crate) fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id]
    }

    #[cfg(test)]
    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The verbatim source text covered by a token.
    #[inline]
    pub(crate) fn raw(&self, id: TokenId) -> &str {
        let token = self.token(id);
        &self.source[token.start..token.end]
    }

    pub(crate) fn children(&self, id: TokenId) -> Children<'_> {
        Children {
            doc: self,
            next: self.token(id).first_child,
        }
    }

    /// Decoded text of a string or field token; borrowed unless it had
    /// escapes.
    pub(crate) fn text(&self, id: TokenId) -> Cow<'_, str> {
        let raw = self.raw(id);
        if self.token(id).escaped {
            Cow::Owned(Unescape::new(raw).collect::<String>())
        } else {
            Cow::Borrowed(raw)
        }
    }

    /// Compares a field name against `key` without allocating.
    pub(crate) fn key_eq(&self, field: TokenId, key: &str) -> bool {
        let raw = self.raw(field);
        if self.token(field).escaped {
            // Decoding only ever shortens the text.
            raw.len() >= key.len() && Unescape::new(raw).eq(key.chars())
        } else {
            raw.len() == key.len() && raw.as_bytes() == key.as_bytes()
        }
    }
}

/// Iterator over the direct children of a token.
#[derive(Clone)]
pub(crate) struct Children<'a> {
    doc: &'a Document,
    next: Option<TokenId>,
}

impl Iterator for Children<'_> {
    type Item = TokenId;

    fn next(&mut self) -> Option<TokenId> {
        let id = self.next?;
        self.next = self.doc.token(id).next_sibling;
        Some(id)
    }
}
