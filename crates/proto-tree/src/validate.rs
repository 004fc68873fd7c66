//! Schema checks for cursors and values.
//!
//! The editors in [`crate::edit`] accept anything structurally addressable.
//! These checks add the schema's view: fields must be declared, only
//! message-typed fields can be descended into, non-repeated fields hold a
//! single value, and values must match their declared type.

use proto_tree_cursor::Selector;
use proto_tree_schema::{FieldDescriptor, MessageId, Schema};

use crate::value::{FieldValue, MessageValue};
use crate::TreeError;

fn step<'s>(schema: &'s Schema, message_id: MessageId, selector: &Selector) -> Result<&'s FieldDescriptor, TreeError> {
    let descriptor = schema.field(message_id, selector.field_id)?;
    if !descriptor.repeated && selector.index > 0 {
        return Err(TreeError::NotRepeated {
            field_id: selector.field_id,
            index: selector.index,
        });
    }
    Ok(descriptor)
}

/// The descriptor of the field addressed by the last step of `cursor`,
/// starting from message type `message_id`.
pub fn field_descriptor_at<'s>(
    schema: &'s Schema,
    message_id: MessageId,
    cursor: &[Selector],
) -> Result<&'s FieldDescriptor, TreeError> {
    let (last, path) = cursor.split_last().ok_or(TreeError::EmptyCursor)?;
    let mut current = message_id;
    for selector in path {
        current = step(schema, current, selector)?
            .field_type
            .message_id()
            .ok_or(TreeError::NotAMessage)?;
    }
    step(schema, current, last)
}

/// Check that writing `value` at `cursor` agrees with the schema.
pub fn check_write(
    schema: &Schema,
    message_id: MessageId,
    cursor: &[Selector],
    value: &FieldValue,
) -> Result<(), TreeError> {
    let descriptor = field_descriptor_at(schema, message_id, cursor)?;
    check_value(schema, descriptor, value)
}

fn check_value(schema: &Schema, descriptor: &FieldDescriptor, value: &FieldValue) -> Result<(), TreeError> {
    if !value.matches(&descriptor.field_type) {
        return Err(TreeError::TypeMismatch {
            expected: descriptor.field_type.as_str(),
            found: value.kind(),
        });
    }
    match (value, descriptor.field_type.message_id()) {
        (FieldValue::Message(nested), Some(nested_id)) => check_message(schema, nested_id, nested),
        _ => Ok(()),
    }
}

/// Check a whole message instance against message type `message_id`.
pub fn check_message(schema: &Schema, message_id: MessageId, message: &MessageValue) -> Result<(), TreeError> {
    schema.message(message_id)?;
    for (field_id, values) in &message.fields {
        let descriptor = schema.field(message_id, *field_id)?;
        if !descriptor.repeated && values.len() > 1 {
            return Err(TreeError::NotRepeated {
                field_id: *field_id,
                index: values.len() - 1,
            });
        }
        for value in values {
            check_value(schema, descriptor, value)?;
        }
    }
    Ok(())
}
