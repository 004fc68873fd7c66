use proto_tree_schema::FieldId;

use crate::types::{Cursor, Selector};
use crate::validate::validate_cursor;
use crate::CursorError;

/// Format a cursor as `"<field>[<index>].<field>[<index>]..."`.
///
/// The root cursor formats as the empty string.
pub fn format_cursor(cursor: &[Selector]) -> String {
    let mut out = String::with_capacity(cursor.len() * 6);
    for (i, selector) in cursor.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&selector.field_id.to_string());
        out.push('[');
        out.push_str(&selector.index.to_string());
        out.push(']');
    }
    out
}

/// Parse the output of [`format_cursor`] back into a cursor.
pub fn parse_cursor(text: &str) -> Result<Cursor, CursorError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let cursor = text
        .split('.')
        .map(parse_selector)
        .collect::<Result<Cursor, _>>()?;
    validate_cursor(&cursor)?;
    Ok(cursor)
}

fn parse_selector(step: &str) -> Result<Selector, CursorError> {
    let invalid = || CursorError::Invalid(step.to_string());
    let body = step.strip_suffix(']').ok_or_else(invalid)?;
    let (field, index) = body.split_once('[').ok_or_else(invalid)?;
    if !is_integer(field) || !is_integer(index) {
        return Err(invalid());
    }
    let field_id: FieldId = field.parse().map_err(|_| invalid())?;
    let index: usize = index.parse().map_err(|_| invalid())?;
    Ok(Selector { field_id, index })
}

/// Check if a cursor points to the root message.
pub fn is_root(cursor: &[Selector]) -> bool {
    cursor.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
pub fn is_child(parent: &[Selector], child: &[Selector]) -> bool {
    parent.len() < child.len() && child.starts_with(parent)
}

/// Check if two cursors address the same position.
pub fn is_cursor_equal(c1: &[Selector], c2: &[Selector]) -> bool {
    c1 == c2
}

/// Drop the last selector. The root is its own parent.
pub fn parent_of(cursor: &[Selector]) -> Cursor {
    match cursor.split_last() {
        Some((_, parent)) => parent.to_vec(),
        None => Vec::new(),
    }
}

/// Cursor extended by one more step.
pub fn child_cursor(cursor: &[Selector], selector: Selector) -> Cursor {
    let mut out = Vec::with_capacity(cursor.len() + 1);
    out.extend_from_slice(cursor);
    out.push(selector);
    out
}

/// Cursor with its last step replaced. The root stays the root.
pub fn with_leaf(cursor: &[Selector], selector: Selector) -> Cursor {
    match cursor.split_last() {
        Some((_, parent)) => child_cursor(parent, selector),
        None => Vec::new(),
    }
}

/// Check if a string consists only of ASCII digits.
pub fn is_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
