//! Built-in schema describing a Rust package manifest.
//!
//! Message 1 is the manifest root; 2 is a package; 3 is a dependency.

use crate::schema::{FieldDescriptor, MessageDescriptor, MessageId, Schema};

pub const MANIFEST: MessageId = 1;
pub const PACKAGE: MessageId = 2;
pub const DEPENDENCY: MessageId = 3;

pub fn rust_manifest_schema() -> Schema {
    Schema::new()
        .with_message(
            MANIFEST,
            MessageDescriptor::new("manifest")
                .with_field(1, FieldDescriptor::message("package", PACKAGE))
                .with_field(2, FieldDescriptor::message("dependencies", DEPENDENCY).repeated())
                .with_field(3, FieldDescriptor::string("field_3").repeated())
                .with_field(4, FieldDescriptor::message("field_4", PACKAGE).repeated()),
        )
        .with_message(
            PACKAGE,
            MessageDescriptor::new("package")
                .with_field(1, FieldDescriptor::string("name"))
                .with_field(2, FieldDescriptor::string("version"))
                .with_field(3, FieldDescriptor::string("authors").repeated()),
        )
        .with_message(
            DEPENDENCY,
            MessageDescriptor::new("dependency")
                .with_field(1, FieldDescriptor::string("name"))
                .with_field(2, FieldDescriptor::string("version"))
                .with_field(3, FieldDescriptor::string("registry")),
        )
}
