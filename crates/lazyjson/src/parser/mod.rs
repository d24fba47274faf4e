//! Single-pass tokenizer that builds the index-overlay token tree.
//!
//! Overview
//! - The scan is a loop over the source bytes driven by the state of the
//!   innermost open container. Open containers live on an explicit stack
//!   (`Vec<Frame>`), so nesting depth never touches the call stack; the
//!   stack is bounded by `ParserOptions::max_depth`.
//! - Scalars are consumed whole by sub-scanners (`string`, `number`,
//!   `literal`) entered from a value position; the main loop only ever sees
//!   structural characters and the first byte of a value.
//! - Each frame remembers the last child appended to its container, so
//!   linking a new sibling is O(1) even though children form a singly linked
//!   list.
//!
//! Nothing is decoded here. Strings record whether they contain escapes;
//! numbers are validated against the grammar but never converted.
//!
//! Offsets are byte offsets into the source. Every structural character is
//! ASCII and UTF-8 continuation bytes never collide with ASCII, so scanning
//! bytes is exact for any `&str` input.

mod literal;
mod number;

pub(crate) mod escape;


use alloc::vec::Vec;

use literal::ExpectedLiteral;
use memchr::memchr2;
use tracing::{debug, trace};

use crate::{
    error::{ErrorKind, Found, LazyError, SyntaxError},
    options::ParserOptions,
    token::{Document, Token, TokenId, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// After `[`: a value or `]`.
    ArrayStart,
    /// After `,` in an array: a value is required.
    BeforeArrayValue,
    AfterArrayValue,
    /// After `{`: a field name or `}`.
    ObjectStart,
    /// After `,` in an object: a field name is required.
    BeforePropertyName,
    /// A field name was read; `:` must follow.
    AfterPropertyName(TokenId),
    BeforePropertyValue(TokenId),
    AfterPropertyValue,
}

impl ParseState {
    fn in_array(self) -> bool {
        matches!(
            self,
            ParseState::ArrayStart | ParseState::BeforeArrayValue | ParseState::AfterArrayValue
        )
    }

    /// What the grammar allows next, for error messages.
    fn expects(self) -> &'static str {
        match self {
            ParseState::ArrayStart => "value or ']'",
            ParseState::BeforeArrayValue | ParseState::BeforePropertyValue(_) => "value",
            ParseState::AfterArrayValue => "',' or ']'",
            ParseState::ObjectStart => "field name or '}'",
            ParseState::BeforePropertyName => "field name",
            ParseState::AfterPropertyName(_) => "':' after field name",
            ParseState::AfterPropertyValue => "',' or '}'",
        }
    }
}

#[derive(Debug)]
struct Frame {
    token: TokenId,
    last_child: Option<TokenId>,
    state: ParseState,
}

/// Scans `text` once and returns the document holding a copy of the text and
/// its token tree. The root container is token [`ROOT`](crate::token::ROOT).
///
/// Leading whitespace is skipped before the first character is checked, so a
/// document that is empty or all whitespace fails at `text.len()`.
pub(crate) fn tokenize(text: &str, options: &ParserOptions) -> Result<Document, LazyError> {
    match Tokenizer::new(text.as_bytes(), options).run() {
        Ok(tokens) => {
            trace!(bytes = text.len(), tokens = tokens.len(), "tokenized document");
            Ok(Document::new(text.into(), tokens))
        }
        Err(err) => {
            debug!(%err, "rejected document");
            Err(err)
        }
    }
}

struct Tokenizer<'a> {
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
    stack: Vec<Frame>,
    options: &'a ParserOptions,
}

impl<'a> Tokenizer<'a> {
    fn new(bytes: &'a [u8], options: &'a ParserOptions) -> Self {
        Self {
            bytes,
            pos: 0,
            // Rough guess: one token per eight bytes of typical JSON.
            tokens: Vec::with_capacity(bytes.len() / 8 + 1),
            stack: Vec::new(),
            options,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LazyError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.open(TokenKind::Object, ParseState::ObjectStart)?,
            Some(b'[') => self.open(TokenKind::Array, ParseState::ArrayStart)?,
            _ => return Err(self.expected("'{' or '[' at the start of the document")),
        }

        while let Some(state) = self.stack.last().map(|frame| frame.state) {
            self.skip_whitespace();
            let Some(b) = self.peek() else {
                return Err(self.expected(state.expects()));
            };
            self.step(state, b)?;
        }

        self.skip_whitespace();
        if !self.options.allow_trailing_data && self.pos < self.bytes.len() {
            return Err(self.syntax_error(SyntaxError::TrailingCharacters {
                found: Found::at(self.bytes, self.pos),
            }));
        }
        #[cfg(any(test, feature = "fuzzing"))]
        assert_well_formed(&self.tokens);
        Ok(self.tokens)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\n' | b'\r' | b'\t')) {
            self.pos += 1;
        }
    }

    /// One structural transition of the innermost container.
    fn step(&mut self, state: ParseState, b: u8) -> Result<(), LazyError> {
        use ParseState::*;
        match (state, b) {
            (ArrayStart | AfterArrayValue, b']') | (ObjectStart | AfterPropertyValue, b'}') => {
                self.close();
                Ok(())
            }
            (AfterArrayValue, b',') => {
                self.advance_to(BeforeArrayValue);
                Ok(())
            }
            (AfterPropertyValue, b',') => {
                self.advance_to(BeforePropertyName);
                Ok(())
            }
            (AfterPropertyName(field), b':') => {
                self.advance_to(BeforePropertyValue(field));
                Ok(())
            }
            (_, b'}' | b']') => Err(self.unexpected_close(state, b)),
            (ArrayStart | BeforeArrayValue | BeforePropertyValue(_), _) => self.value(b),
            (ObjectStart | BeforePropertyName, b'"') => {
                let (start, end, escaped) = self.string()?;
                let mut field = Token::new(TokenKind::Field, start, end);
                field.escaped = escaped;
                self.attach(field);
                Ok(())
            }
            _ => Err(self.expected(state.expects())),
        }
    }

    /// Consumes a punctuator and moves the innermost container to `state`.
    fn advance_to(&mut self, state: ParseState) {
        if let Some(frame) = self.stack.last_mut() {
            frame.state = state;
        }
        self.pos += 1;
    }

    /// A closing delimiter where the grammar does not allow one. A delimiter
    /// of the other container kind is reported as such; a matching one means
    /// a value or field name was missing.
    fn unexpected_close(&self, state: ParseState, b: u8) -> LazyError {
        match (b, state.in_array()) {
            (b'}', true) => self.syntax_error(SyntaxError::UnexpectedEndOfObject),
            (b']', false) => self.syntax_error(SyntaxError::UnexpectedEndOfArray),
            _ => self.expected(state.expects()),
        }
    }

    fn value(&mut self, b: u8) -> Result<(), LazyError> {
        let start = self.pos;
        match b {
            b'{' => self.open(TokenKind::Object, ParseState::ObjectStart),
            b'[' => self.open(TokenKind::Array, ParseState::ArrayStart),
            b'"' => {
                let (start, end, escaped) = self.string()?;
                let mut token = Token::new(TokenKind::String, start, end);
                token.escaped = escaped;
                self.attach(token);
                Ok(())
            }
            b'-' | b'0'..=b'9' => {
                let end = number::scan_number(self.bytes, start, self.options.allow_leading_zeros)?;
                self.attach(Token::new(TokenKind::Number, start, end));
                self.pos = end;
                Ok(())
            }
            _ => match ExpectedLiteral::from_first(b) {
                Some(literal) => {
                    let end = literal.scan(self.bytes, start)?;
                    self.attach(Token::new(literal.kind(), start, end));
                    self.pos = end;
                    Ok(())
                }
                None => Err(self.expected("value")),
            },
        }
    }

    /// Starts a container at the current `{` or `[` and pushes its frame.
    fn open(&mut self, kind: TokenKind, state: ParseState) -> Result<(), LazyError> {
        if self.stack.len() >= self.options.max_depth {
            return Err(LazyError::at(
                ErrorKind::DepthExceeded {
                    limit: self.options.max_depth,
                },
                self.pos,
            ));
        }
        let token = self.attach(Token::new(kind, self.pos, self.pos));
        self.stack.push(Frame {
            token,
            last_child: None,
            state,
        });
        self.pos += 1;
        Ok(())
    }

    /// Closes the innermost container at the current delimiter.
    fn close(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.tokens[frame.token].end = self.pos + 1;
        }
        self.pos += 1;
    }

    /// Stores a token and links it into the innermost container: as the next
    /// element of an array, as a new field of an object, or as the value of
    /// the pending field. The innermost container's state advances
    /// accordingly.
    fn attach(&mut self, token: Token) -> TokenId {
        let id = self.tokens.len();
        self.tokens.push(token);
        let Some(frame) = self.stack.last_mut() else {
            // the root container
            return id;
        };
        let state = frame.state;
        frame.state = match state {
            ParseState::ArrayStart | ParseState::BeforeArrayValue => {
                append_child(&mut self.tokens, frame, id);
                ParseState::AfterArrayValue
            }
            ParseState::ObjectStart | ParseState::BeforePropertyName => {
                append_child(&mut self.tokens, frame, id);
                ParseState::AfterPropertyName(id)
            }
            ParseState::BeforePropertyValue(field) => {
                self.tokens[field].first_child = Some(id);
                ParseState::AfterPropertyValue
            }
            state => unreachable!("token attached in state {state:?}"),
        };
        id
    }

    /// Scans the string whose opening quote is at the current position.
    /// Returns the content span (quotes excluded) and whether it contains
    /// escapes; leaves the position past the closing quote.
    fn string(&mut self) -> Result<(usize, usize, bool), LazyError> {
        let bytes = self.bytes;
        let start = self.pos + 1;
        let mut at = start;
        let mut escaped = false;
        loop {
            let rest = &bytes[at..];
            let special = memchr2(b'"', b'\\', rest);
            let plain = &rest[..special.unwrap_or(rest.len())];
            if let Some(i) = plain.iter().position(|&c| c < 0x20) {
                return Err(LazyError::at(SyntaxError::ControlCharacter(plain[i]), at + i));
            }
            let Some(offset) = special else {
                return Err(LazyError::at(
                    SyntaxError::Expected {
                        expected: "'\"' to close the string",
                        found: Found::EndOfInput,
                    },
                    bytes.len(),
                ));
            };
            at += offset;
            if bytes[at] == b'"' {
                self.pos = at + 1;
                return Ok((start, at, escaped));
            }
            escaped = true;
            at = escape::scan_escape(bytes, at)?;
        }
    }

    fn expected(&self, expected: &'static str) -> LazyError {
        self.syntax_error(SyntaxError::Expected {
            expected,
            found: Found::at(self.bytes, self.pos),
        })
    }

    fn syntax_error(&self, err: SyntaxError) -> LazyError {
        LazyError::at(err, self.pos)
    }
}

fn append_child(tokens: &mut [Token], frame: &mut Frame, id: TokenId) {
    match frame.last_child {
        Some(prev) => tokens[prev].next_sibling = Some(id),
        None => tokens[frame.token].first_child = Some(id),
    }
    frame.last_child = Some(id);
}

/// Checks the structural invariants of a finished token tree.
///
/// Enabled only in test and fuzzing builds.
#[cfg(any(test, feature = "fuzzing"))]
fn assert_well_formed(tokens: &[Token]) {
    for (id, token) in tokens.iter().enumerate() {
        assert!(token.end >= token.start, "token {id} ends before it starts");
        // Children and later siblings are always created after their
        // predecessor, which also rules out cycles.
        assert!(token.first_child.is_none_or(|child| child > id));
        assert!(token.next_sibling.is_none_or(|next| next > id));

        let mut child = token.first_child;
        let mut count = 0;
        while let Some(c) = child {
            if token.kind == TokenKind::Object {
                assert_eq!(tokens[c].kind, TokenKind::Field, "object member {c} is not a field");
            }
            count += 1;
            child = tokens[c].next_sibling;
        }
        match token.kind {
            TokenKind::Object | TokenKind::Array => {
                assert!(token.end > token.start, "container {id} was never closed");
            }
            TokenKind::Field => assert_eq!(count, 1, "field {id} must hold exactly one value"),
            _ => assert_eq!(count, 0, "scalar {id} has children"),
        }
    }
}
