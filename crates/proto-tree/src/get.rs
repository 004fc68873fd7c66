//! Cursor resolution.

use proto_tree_cursor::{child_cursor, Cursor, Selector};

use crate::value::{FieldValue, MessageValue};
use crate::TreeError;

/// What a cursor resolves to: the root message itself, or a value below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Root(&'a MessageValue),
    Value(&'a FieldValue),
}

impl<'a> Resolved<'a> {
    /// The message at this position, if the position holds one.
    pub fn as_message(self) -> Option<&'a MessageValue> {
        match self {
            Resolved::Root(m) => Some(m),
            Resolved::Value(v) => v.as_message(),
        }
    }

    /// The field value at this position; `None` for the root.
    pub fn value(self) -> Option<&'a FieldValue> {
        match self {
            Resolved::Root(_) => None,
            Resolved::Value(v) => Some(v),
        }
    }

    /// Owned copy, with the root wrapped as a message value.
    pub fn to_field_value(self) -> FieldValue {
        match self {
            Resolved::Root(m) => FieldValue::Message(m.clone()),
            Resolved::Value(v) => v.clone(),
        }
    }
}

/// Walk `cursor` down from `root`.
///
/// # Errors
///
/// - [`TreeError::NotAMessage`] if a step other than the last lands on a scalar
/// - [`TreeError::FieldNotFound`] if a step names a field with no entry
/// - [`TreeError::IndexOutOfRange`] if a step indexes past the sequence
pub fn resolve<'a>(root: &'a MessageValue, cursor: &[Selector]) -> Result<Resolved<'a>, TreeError> {
    let mut current = Resolved::Root(root);
    for selector in cursor {
        let message = current.as_message().ok_or(TreeError::NotAMessage)?;
        let values = message
            .values(selector.field_id)
            .ok_or(TreeError::FieldNotFound(selector.field_id))?;
        let value = values.get(selector.index).ok_or(TreeError::IndexOutOfRange {
            index: selector.index,
            len: values.len(),
        })?;
        current = Resolved::Value(value);
    }
    Ok(current)
}

/// Like [`resolve`], with every failure mapped to `None`.
pub fn get<'a>(root: &'a MessageValue, cursor: &[Selector]) -> Option<Resolved<'a>> {
    resolve(root, cursor).ok()
}

/// Resolve `cursor` and require a message there.
pub fn resolve_message<'a>(root: &'a MessageValue, cursor: &[Selector]) -> Result<&'a MessageValue, TreeError> {
    resolve(root, cursor)?.as_message().ok_or(TreeError::NotAMessage)
}

/// Whether `cursor` addresses an existing position.
pub fn is_resolvable(root: &MessageValue, cursor: &[Selector]) -> bool {
    resolve(root, cursor).is_ok()
}

/// Every populated position below `root`, depth first, fields in ascending
/// id order. The root cursor is not included.
pub fn cursors(root: &MessageValue) -> Vec<Cursor> {
    let mut out = Vec::new();
    collect_cursors(root, &[], &mut out);
    out
}

fn collect_cursors(message: &MessageValue, prefix: &[Selector], out: &mut Vec<Cursor>) {
    for field_id in message.populated_field_ids() {
        let Some(values) = message.values(field_id) else {
            continue;
        };
        for (index, value) in values.iter().enumerate() {
            let cursor = child_cursor(prefix, Selector::new(field_id, index));
            if let FieldValue::Message(nested) = value {
                out.push(cursor.clone());
                collect_cursors(nested, &cursor, out);
            } else {
                out.push(cursor);
            }
        }
    }
}
