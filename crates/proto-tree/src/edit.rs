//! Copy-on-edit tree mutation.
//!
//! Both editors take the root by reference and return a new root; the input
//! is never modified. An edit that tries to descend through a scalar is not
//! an error: it is logged and the result is an unchanged copy of the input.

use proto_tree_cursor::{format_cursor, Selector};

use crate::value::{FieldValue, MessageValue};
use crate::TreeError;

/// Write `value` at `cursor`.
///
/// Missing fields are created along the way. The last step may address an
/// existing element or the position just past the end of the sequence, which
/// appends. Intermediate steps at that same append position get a fresh
/// empty message.
///
/// # Errors
///
/// - [`TreeError::EmptyCursor`] if `cursor` is empty
/// - [`TreeError::IndexOutOfRange`] if a step indexes beyond the append position
pub fn set_field_value(root: &MessageValue, cursor: &[Selector], value: FieldValue) -> Result<MessageValue, TreeError> {
    if cursor.is_empty() {
        return Err(TreeError::EmptyCursor);
    }
    let mut out = root.clone();
    if set_in(&mut out, cursor, value)? {
        Ok(out)
    } else {
        tracing::debug!(
            cursor = %format_cursor(cursor),
            "set_field_value: path crosses a non-message value, tree left unchanged"
        );
        Ok(root.clone())
    }
}

fn set_in(message: &mut MessageValue, cursor: &[Selector], value: FieldValue) -> Result<bool, TreeError> {
    let Some((selector, rest)) = cursor.split_first() else {
        return Err(TreeError::EmptyCursor);
    };
    let index = selector.index;
    let values = message.fields.entry(selector.field_id).or_default();
    let len = values.len();
    if index > len {
        return Err(TreeError::IndexOutOfRange { index, len });
    }
    if rest.is_empty() {
        if index == len {
            values.push(value);
        } else {
            values[index] = value;
        }
        return Ok(true);
    }
    if index == len {
        values.push(FieldValue::Message(MessageValue::new()));
    }
    match &mut values[index] {
        FieldValue::Message(nested) => set_in(nested, rest, value),
        _ => Ok(false),
    }
}

/// Remove the value at `cursor`, shifting later elements of its sequence
/// left. Removing the only element drops the field entry entirely.
///
/// A cursor whose first field is absent removes nothing.
///
/// # Errors
///
/// - [`TreeError::EmptyCursor`] if `cursor` is empty
/// - [`TreeError::IndexOutOfRange`] if a step indexes past its sequence
pub fn remove_field_value(root: &MessageValue, cursor: &[Selector]) -> Result<MessageValue, TreeError> {
    if cursor.is_empty() {
        return Err(TreeError::EmptyCursor);
    }
    let mut out = root.clone();
    if remove_in(&mut out, cursor)? {
        Ok(out)
    } else {
        tracing::debug!(
            cursor = %format_cursor(cursor),
            "remove_field_value: nothing to remove, tree left unchanged"
        );
        Ok(root.clone())
    }
}

fn remove_in(message: &mut MessageValue, cursor: &[Selector]) -> Result<bool, TreeError> {
    let Some((selector, rest)) = cursor.split_first() else {
        return Err(TreeError::EmptyCursor);
    };
    let index = selector.index;
    let Some(values) = message.fields.get_mut(&selector.field_id) else {
        return Ok(false);
    };
    let len = values.len();
    if index >= len {
        return Err(TreeError::IndexOutOfRange { index, len });
    }
    if rest.is_empty() {
        values.remove(index);
        if values.is_empty() {
            message.fields.shift_remove(&selector.field_id);
        }
        return Ok(true);
    }
    match &mut values[index] {
        FieldValue::Message(nested) => remove_in(nested, rest),
        _ => Ok(false),
    }
}
