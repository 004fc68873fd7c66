//! Schema model for proto-tree.
//!
//! A [`Schema`] maps message ids to [`MessageDescriptor`]s, which in turn map
//! field ids to [`FieldDescriptor`]s. Lookups are plain map reads; a missing
//! id is reported as `None` (or a [`SchemaError`] from the `Result` variants)
//! and never panics.
//!
//! # Example
//!
//! ```
//! use proto_tree_schema::{FieldDescriptor, MessageDescriptor, Schema};
//!
//! let schema = Schema::new().with_message(
//!     1,
//!     MessageDescriptor::new("package")
//!         .with_field(1, FieldDescriptor::string("name"))
//!         .with_field(3, FieldDescriptor::string("authors").repeated()),
//! );
//! assert_eq!(schema.lookup_field(1, 3).unwrap().to_string(), "authors: string");
//! assert!(schema.lookup_field(1, 2).is_none());
//! ```

use thiserror::Error;

pub mod manifest;
pub mod schema;

pub use manifest::rust_manifest_schema;
pub use schema::{
    print_field_descriptor, FieldDescriptor, FieldId, FieldType, MessageDescriptor, MessageId, Schema,
};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("MESSAGE_NOT_FOUND: {0}")]
    MessageNotFound(MessageId),
    #[error("FIELD_NOT_FOUND: field {field_id} in message {message_id}")]
    FieldNotFound { message_id: MessageId, field_id: FieldId },
    #[error("DANGLING_REFERENCE: field {field_id} in message {message_id} references message {target}")]
    DanglingReference {
        message_id: MessageId,
        field_id: FieldId,
        target: MessageId,
    },
    #[error("INVALID_SCHEMA: {0}")]
    Json(#[from] serde_json::Error),
}
