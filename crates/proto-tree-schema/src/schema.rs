//! Message and field descriptors.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// Identifier of a message type within a [`Schema`].
pub type MessageId = u32;

/// Identifier of a field within a [`MessageDescriptor`].
pub type FieldId = u32;

// ── Field types ───────────────────────────────────────────────────────────

/// The declared type of a field slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Message { message_id: MessageId },
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Message { .. } => "message",
        }
    }

    /// The referenced message type, for message fields.
    pub fn message_id(&self) -> Option<MessageId> {
        match self {
            FieldType::Message { message_id } => Some(*message_id),
            _ => None,
        }
    }
}

// ── Descriptors ───────────────────────────────────────────────────────────

/// Describes one field slot within a message type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub name: String,
    #[serde(default)]
    pub repeated: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldDescriptor {
            field_type,
            name: name.into(),
            repeated: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn message(name: impl Into<String>, message_id: MessageId) -> Self {
        Self::new(name, FieldType::Message { message_id })
    }

    /// Mark the field as repeated.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

/// Renders `"<name>: string"`, `"<name>: number"`, `"<name>: boolean"` or
/// `"<name>: message <id>"`.
impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field_type {
            FieldType::Message { message_id } => write!(f, "{}: message {}", self.name, message_id),
            other => write!(f, "{}: {}", self.name, other.as_str()),
        }
    }
}

/// Stable, human-readable rendering of a field's schema entry.
pub fn print_field_descriptor(descriptor: &FieldDescriptor) -> String {
    descriptor.to_string()
}

/// Describes one message type. Fields keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    pub name: String,
    #[serde(default)]
    pub fields: IndexMap<FieldId, FieldDescriptor>,
}

impl MessageDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        MessageDescriptor {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Declare a field. Re-declaring an id replaces the descriptor in place.
    pub fn with_field(mut self, field_id: FieldId, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(field_id, descriptor);
        self
    }

    pub fn field(&self, field_id: FieldId) -> Option<&FieldDescriptor> {
        self.fields.get(&field_id)
    }
}

// ── Schema ────────────────────────────────────────────────────────────────

/// Static catalog of message types.
///
/// Built once and then only read; sessions share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub messages: IndexMap<MessageId, MessageDescriptor>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message_id: MessageId, descriptor: MessageDescriptor) -> Self {
        self.messages.insert(message_id, descriptor);
        self
    }

    /// Parse a schema document and check its message references.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn to_json_string(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn lookup_message(&self, message_id: MessageId) -> Option<&MessageDescriptor> {
        self.messages.get(&message_id)
    }

    pub fn lookup_field(&self, message_id: MessageId, field_id: FieldId) -> Option<&FieldDescriptor> {
        self.lookup_message(message_id)?.field(field_id)
    }

    /// Fields of a message in declaration order.
    pub fn fields_of(
        &self,
        message_id: MessageId,
    ) -> Option<impl Iterator<Item = (FieldId, &FieldDescriptor)> + '_> {
        self.lookup_message(message_id)
            .map(|m| m.fields.iter().map(|(id, d)| (*id, d)))
    }

    pub fn message(&self, message_id: MessageId) -> Result<&MessageDescriptor, SchemaError> {
        self.lookup_message(message_id)
            .ok_or(SchemaError::MessageNotFound(message_id))
    }

    pub fn field(&self, message_id: MessageId, field_id: FieldId) -> Result<&FieldDescriptor, SchemaError> {
        self.message(message_id)?
            .field(field_id)
            .ok_or(SchemaError::FieldNotFound { message_id, field_id })
    }

    /// Check that every message-typed field references a declared message.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (message_id, message) in &self.messages {
            for (field_id, field) in &message.fields {
                if let Some(target) = field.field_type.message_id() {
                    if !self.messages.contains_key(&target) {
                        return Err(SchemaError::DanglingReference {
                            message_id: *message_id,
                            field_id: *field_id,
                            target,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Schema {
        Schema::new()
            .with_message(
                1,
                MessageDescriptor::new("outer")
                    .with_field(9, FieldDescriptor::string("title"))
                    .with_field(2, FieldDescriptor::message("inner", 2).repeated())
                    .with_field(5, FieldDescriptor::boolean("flag")),
            )
            .with_message(2, MessageDescriptor::new("inner").with_field(1, FieldDescriptor::number("n")))
    }

    #[test]
    fn test_print_field_descriptor() {
        assert_eq!(print_field_descriptor(&FieldDescriptor::string("name")), "name: string");
        assert_eq!(print_field_descriptor(&FieldDescriptor::number("count")), "count: number");
        assert_eq!(print_field_descriptor(&FieldDescriptor::boolean("ok")), "ok: boolean");
        assert_eq!(
            print_field_descriptor(&FieldDescriptor::message("package", 2).repeated()),
            "package: message 2"
        );
    }

    #[test]
    fn test_lookup() {
        let schema = sample();
        assert_eq!(schema.lookup_message(1).map(|m| m.name.as_str()), Some("outer"));
        assert!(schema.lookup_message(3).is_none());
        assert_eq!(schema.lookup_field(2, 1), Some(&FieldDescriptor::number("n")));
        assert!(schema.lookup_field(2, 7).is_none());
        assert!(schema.lookup_field(3, 1).is_none());
    }

    #[test]
    fn test_fields_of_keeps_declaration_order() {
        let schema = sample();
        let ids: Vec<FieldId> = schema.fields_of(1).unwrap().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![9, 2, 5]);
        assert!(schema.fields_of(42).is_none());
    }

    #[test]
    fn test_result_lookups() {
        let schema = sample();
        assert!(matches!(schema.message(8), Err(SchemaError::MessageNotFound(8))));
        assert!(matches!(
            schema.field(1, 3),
            Err(SchemaError::FieldNotFound { message_id: 1, field_id: 3 })
        ));
        assert_eq!(schema.field(1, 5).unwrap().name, "flag");
    }

    #[test]
    fn test_validate_dangling_reference() {
        let schema = Schema::new().with_message(
            1,
            MessageDescriptor::new("a").with_field(1, FieldDescriptor::message("b", 7)),
        );
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::DanglingReference { message_id: 1, field_id: 1, target: 7 })
        ));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_recursive_reference_is_valid() {
        let schema = Schema::new().with_message(
            1,
            MessageDescriptor::new("node").with_field(1, FieldDescriptor::message("children", 1).repeated()),
        );
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_field_type_json_shape() {
        assert_eq!(serde_json::to_value(FieldType::String).unwrap(), json!({"type": "string"}));
        assert_eq!(
            serde_json::to_value(FieldType::Message { message_id: 3 }).unwrap(),
            json!({"type": "message", "message_id": 3})
        );
    }

    #[test]
    fn test_from_json_str() {
        let doc = json!({
            "messages": {
                "1": {
                    "name": "outer",
                    "fields": {
                        "4": {"type": {"type": "message", "message_id": 2}, "name": "inner", "repeated": true},
                        "1": {"type": {"type": "string"}, "name": "title"}
                    }
                },
                "2": {"name": "inner"}
            }
        });
        let schema = Schema::from_json_str(&doc.to_string()).unwrap();
        let ids: Vec<FieldId> = schema.fields_of(1).unwrap().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![4, 1]);
        assert!(!schema.lookup_field(1, 1).unwrap().repeated);
        assert!(schema.lookup_field(1, 4).unwrap().repeated);
        assert!(schema.lookup_message(2).unwrap().fields.is_empty());
    }

    #[test]
    fn test_from_json_str_errors() {
        assert!(matches!(Schema::from_json_str("{"), Err(SchemaError::Json(_))));
        let dangling = r#"{"messages": {"1": {"name": "a", "fields": {"1": {"type": {"type": "message", "message_id": 2}, "name": "b"}}}}}"#;
        assert!(matches!(
            Schema::from_json_str(dangling),
            Err(SchemaError::DanglingReference { .. })
        ));
    }
}
