use crate::{
    error::{Found, LazyError, SyntaxError},
    token::TokenKind,
};

/// One of the three JSON keywords, selected by its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpectedLiteral {
    Null,
    True,
    False,
}

impl ExpectedLiteral {
    pub(crate) fn from_first(b: u8) -> Option<Self> {
        match b {
            b'n' => Some(Self::Null),
            b't' => Some(Self::True),
            b'f' => Some(Self::False),
            _ => None,
        }
    }

    pub(crate) fn text(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
        }
    }

    pub(crate) fn kind(self) -> TokenKind {
        match self {
            Self::Null => TokenKind::Null,
            Self::True => TokenKind::True,
            Self::False => TokenKind::False,
        }
    }

    /// Matches the literal byte by byte from `start` and returns the offset
    /// just past it. Fails at the first mismatching byte.
    pub(crate) fn scan(self, bytes: &[u8], start: usize) -> Result<usize, LazyError> {
        let text = self.text().as_bytes();
        for (i, expected) in text.iter().enumerate().skip(1) {
            let at = start + i;
            if bytes.get(at) != Some(expected) {
                return Err(LazyError::at(
                    SyntaxError::InvalidLiteral {
                        literal: self.text(),
                        found: Found::at(bytes, at),
                    },
                    at,
                ));
            }
        }
        Ok(start + text.len())
    }
}
