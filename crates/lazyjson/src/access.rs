//! Typed reads of a single value token, shared by both views.

use alloc::{borrow::Cow, sync::Arc};

use crate::{
    array::LazyArray,
    error::{ErrorKind, LazyError, SyntaxError},
    object::LazyObject,
    token::{Document, TokenId, TokenKind},
    value::{LazyValue, Number, ValueKind},
};

pub(crate) fn corrupt(doc: &Document, id: TokenId, what: &'static str) -> LazyError {
    LazyError::at(SyntaxError::CorruptTree(what), doc.token(id).start)
}

pub(crate) fn kind_of(doc: &Document, id: TokenId) -> Result<ValueKind, LazyError> {
    doc.token(id)
        .kind()
        .value_kind()
        .ok_or_else(|| corrupt(doc, id, "field in value position"))
}

fn expect(doc: &Document, id: TokenId, expected: ValueKind) -> Result<(), LazyError> {
    let found = kind_of(doc, id)?;
    if found == expected {
        Ok(())
    } else {
        Err(LazyError::at(
            ErrorKind::TypeMismatch { expected, found },
            doc.token(id).start,
        ))
    }
}

pub(crate) fn array(doc: &Arc<Document>, id: TokenId) -> Result<LazyArray, LazyError> {
    expect(doc, id, ValueKind::Array)?;
    Ok(LazyArray::new(Arc::clone(doc), id))
}

pub(crate) fn object(doc: &Arc<Document>, id: TokenId) -> Result<LazyObject, LazyError> {
    expect(doc, id, ValueKind::Object)?;
    Ok(LazyObject::new(Arc::clone(doc), id))
}

pub(crate) fn string(doc: &Document, id: TokenId) -> Result<Cow<'_, str>, LazyError> {
    expect(doc, id, ValueKind::String)?;
    Ok(doc.text(id))
}

pub(crate) fn number(doc: &Document, id: TokenId) -> Result<Number<'_>, LazyError> {
    expect(doc, id, ValueKind::Number)?;
    Ok(Number::new(doc.raw(id), doc.token(id).start))
}

pub(crate) fn boolean(doc: &Document, id: TokenId) -> Result<bool, LazyError> {
    expect(doc, id, ValueKind::Boolean)?;
    Ok(doc.token(id).kind() == TokenKind::True)
}

pub(crate) fn is_null(doc: &Document, id: TokenId) -> Result<bool, LazyError> {
    Ok(kind_of(doc, id)? == ValueKind::Null)
}

pub(crate) fn value(doc: &Arc<Document>, id: TokenId) -> Result<LazyValue<'_>, LazyError> {
    let token = doc.token(id);
    Ok(match token.kind() {
        TokenKind::Object => LazyValue::Object(LazyObject::new(Arc::clone(doc), id)),
        TokenKind::Array => LazyValue::Array(LazyArray::new(Arc::clone(doc), id)),
        TokenKind::String => LazyValue::String(doc.text(id)),
        TokenKind::Number => LazyValue::Number(Number::new(doc.raw(id), token.start)),
        TokenKind::Null => LazyValue::Null,
        TokenKind::True => LazyValue::Bool(true),
        TokenKind::False => LazyValue::Bool(false),
        TokenKind::Field => return Err(corrupt(doc, id, "field in value position")),
    })
}
