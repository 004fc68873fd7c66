//! proto-tree: schema-described message trees.
//!
//! A [`MessageValue`] is a dynamically typed record: each field id maps to a
//! sequence of [`FieldValue`]s, which are scalars or nested messages. A
//! [`Cursor`] addresses one value by a path of `(field, index)` steps.
//!
//! Everything here is a pure function over immutable inputs:
//! - [`resolve`] walks a cursor down a tree
//! - [`child_of`], [`next_sibling`], [`previous_sibling`] and [`parent_of`]
//!   move a cursor across the populated tree
//! - [`set_field_value`] and [`remove_field_value`] return an edited copy
//!
//! [`Session`] layers schema checks and a selection on top, driven by
//! [`Action`]s.
//!
//! # Example
//!
//! ```
//! use proto_tree::{child_of, resolve, set_field_value, string_value, MessageValue, Selector};
//!
//! let root = MessageValue::new();
//! let cursor = vec![Selector::new(45, 0), Selector::new(51, 0)];
//! let root = set_field_value(&root, &cursor, string_value("x")).unwrap();
//!
//! assert_eq!(resolve(&root, &cursor).unwrap().value(), Some(&string_value("x")));
//! assert_eq!(child_of(&root, &[]).unwrap(), vec![Selector::new(45, 0)]);
//! ```

use proto_tree_schema::{FieldId, MessageId, SchemaError};
use thiserror::Error;

pub mod cli;
pub mod edit;
pub mod get;
pub mod navigate;
pub mod session;
pub mod validate;
pub mod value;

pub use edit::{remove_field_value, set_field_value};
pub use get::{cursors, get, is_resolvable, resolve, resolve_message, Resolved};
pub use navigate::{
    child_of, find_next_sibling, find_previous_sibling, navigate, next_sibling, previous_sibling, Direction,
};
pub use session::{Action, Session};
pub use validate::{check_message, check_write, field_descriptor_at};
pub use value::{boolean_value, field, message_value, number_value, string_value, FieldValue, MessageValue};

pub use proto_tree_cursor::{format_cursor, parent_of, parse_cursor, Cursor, Selector};
pub use proto_tree_schema::{print_field_descriptor, FieldDescriptor, FieldType, MessageDescriptor, Schema};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("MESSAGE_NOT_FOUND: {0}")]
    MessageNotFound(MessageId),
    #[error("FIELD_NOT_FOUND: {0}")]
    FieldNotFound(FieldId),
    #[error("NOT_A_MESSAGE")]
    NotAMessage,
    #[error("INDEX_OUT_OF_RANGE: {index} (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("NO_SUCH_SIBLING")]
    NoSuchSibling,
    #[error("EMPTY_CURSOR")]
    EmptyCursor,
    #[error("NOT_REPEATED: field {field_id} has no index {index}")]
    NotRepeated { field_id: FieldId, index: usize },
    #[error("TYPE_MISMATCH: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("INVALID_SCHEMA: {0}")]
    InvalidSchema(String),
}

impl From<SchemaError> for TreeError {
    fn from(e: SchemaError) -> Self {
        match e {
            SchemaError::MessageNotFound(id) => TreeError::MessageNotFound(id),
            SchemaError::FieldNotFound { field_id, .. } => TreeError::FieldNotFound(field_id),
            other => TreeError::InvalidSchema(other.to_string()),
        }
    }
}
