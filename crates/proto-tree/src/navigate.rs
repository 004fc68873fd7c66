//! Cursor movement over the populated tree.
//!
//! Movement follows the fields actually present in the value, ordered by
//! ascending field id, not the schema's declaration order. Sibling moves
//! saturate: at the first or last populated position of a message the
//! cursor comes back unchanged. The `find_*` variants report that boundary
//! as [`TreeError::NoSuchSibling`] instead.

use proto_tree_cursor::{child_cursor, parent_of, with_leaf, Cursor, Selector};
use serde::{Deserialize, Serialize};

use crate::get::resolve;
use crate::value::MessageValue;
use crate::TreeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
    Parent,
    Child,
}

/// First child of the position: the smallest populated field id at index 0.
/// Scalars and empty messages have no children and return `cursor` as is.
pub fn child_of(root: &MessageValue, cursor: &[Selector]) -> Result<Cursor, TreeError> {
    let first = resolve(root, cursor)?
        .as_message()
        .and_then(|m| m.populated_field_ids().first().copied());
    Ok(match first {
        Some(field_id) => child_cursor(cursor, Selector::new(field_id, 0)),
        None => cursor.to_vec(),
    })
}

/// The leaf selector, the message containing it, and the length of the
/// leaf's sequence. `None` when there is nothing to move among.
fn leaf_context<'a>(
    root: &'a MessageValue,
    cursor: &[Selector],
) -> Result<Option<(Selector, &'a MessageValue, usize)>, TreeError> {
    let Some((leaf, parent)) = cursor.split_last() else {
        return Ok(None);
    };
    let Some(message) = resolve(root, parent)?.as_message() else {
        return Ok(None);
    };
    let values = message
        .values(leaf.field_id)
        .ok_or(TreeError::FieldNotFound(leaf.field_id))?;
    if leaf.index >= values.len() {
        return Err(TreeError::IndexOutOfRange {
            index: leaf.index,
            len: values.len(),
        });
    }
    Ok(Some((*leaf, message, values.len())))
}

pub fn find_next_sibling(root: &MessageValue, cursor: &[Selector]) -> Result<Cursor, TreeError> {
    let (leaf, message, len) = leaf_context(root, cursor)?.ok_or(TreeError::NoSuchSibling)?;
    if leaf.index + 1 < len {
        return Ok(with_leaf(cursor, leaf.at(leaf.index + 1)));
    }
    let next = message
        .populated_field_ids()
        .into_iter()
        .find(|&id| id > leaf.field_id)
        .ok_or(TreeError::NoSuchSibling)?;
    Ok(with_leaf(cursor, Selector::new(next, 0)))
}

pub fn find_previous_sibling(root: &MessageValue, cursor: &[Selector]) -> Result<Cursor, TreeError> {
    let (leaf, message, _) = leaf_context(root, cursor)?.ok_or(TreeError::NoSuchSibling)?;
    if leaf.index > 0 {
        return Ok(with_leaf(cursor, leaf.at(leaf.index - 1)));
    }
    let previous = message
        .populated_field_ids()
        .into_iter()
        .rev()
        .find(|&id| id < leaf.field_id)
        .ok_or(TreeError::NoSuchSibling)?;
    // Populated fields are never empty.
    let last = message.values(previous).map_or(0, |v| v.len().saturating_sub(1));
    Ok(with_leaf(cursor, Selector::new(previous, last)))
}

pub fn next_sibling(root: &MessageValue, cursor: &[Selector]) -> Result<Cursor, TreeError> {
    saturate(find_next_sibling(root, cursor), cursor)
}

pub fn previous_sibling(root: &MessageValue, cursor: &[Selector]) -> Result<Cursor, TreeError> {
    saturate(find_previous_sibling(root, cursor), cursor)
}

fn saturate(result: Result<Cursor, TreeError>, cursor: &[Selector]) -> Result<Cursor, TreeError> {
    match result {
        Err(TreeError::NoSuchSibling) => Ok(cursor.to_vec()),
        other => other,
    }
}

/// Apply one keyboard-style move.
pub fn navigate(root: &MessageValue, cursor: &[Selector], direction: Direction) -> Result<Cursor, TreeError> {
    match direction {
        Direction::Previous => previous_sibling(root, cursor),
        Direction::Next => next_sibling(root, cursor),
        Direction::Parent => Ok(parent_of(cursor)),
        Direction::Child => child_of(root, cursor),
    }
}
