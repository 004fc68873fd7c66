//! Validation functions for cursors.

use crate::types::Selector;
use crate::CursorError;

/// Maximum allowed cursor depth.
pub const MAX_CURSOR_DEPTH: usize = 256;

/// Validate a cursor before it is used to address a tree.
///
/// # Errors
///
/// Returns [`CursorError::TooDeep`] if the cursor has more than
/// [`MAX_CURSOR_DEPTH`] steps.
///
/// # Example
///
/// ```
/// use proto_tree_cursor::{validate_cursor, Selector};
///
/// validate_cursor(&[Selector::new(1, 0)]).unwrap();
/// validate_cursor(&vec![Selector::new(1, 0); 300]).unwrap_err();
/// ```
pub fn validate_cursor(cursor: &[Selector]) -> Result<(), CursorError> {
    if cursor.len() > MAX_CURSOR_DEPTH {
        return Err(CursorError::TooDeep(cursor.len()));
    }
    Ok(())
}
