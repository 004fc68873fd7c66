//! Cursor paths into proto-tree values.
//!
//! A cursor is a root-to-leaf list of [`Selector`] steps, each naming a
//! field of the current message and a position in that field's sequence.
//!
//! # Example
//!
//! ```
//! use proto_tree_cursor::{format_cursor, parent_of, parse_cursor, Selector};
//!
//! let cursor = parse_cursor("45[1].51[0]").unwrap();
//! assert_eq!(cursor, vec![Selector::new(45, 1), Selector::new(51, 0)]);
//! assert_eq!(format_cursor(&cursor), "45[1].51[0]");
//! assert_eq!(parent_of(&cursor), vec![Selector::new(45, 1)]);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Cursor, Selector};

mod util;
pub use util::{
    child_cursor, format_cursor, is_child, is_cursor_equal, is_integer, is_root, parent_of,
    parse_cursor, with_leaf,
};

pub mod validate;
pub use validate::{validate_cursor, MAX_CURSOR_DEPTH};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("CURSOR_INVALID: {0}")]
    Invalid(String),
    #[error("CURSOR_TOO_DEEP: {0}")]
    TooDeep(usize),
}
