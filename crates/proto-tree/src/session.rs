//! Editing session: the current tree, the current selection, and the
//! dispatcher that applies [`Action`]s to them.

use std::sync::Arc;

use proto_tree_cursor::{child_cursor, format_cursor, parent_of, Cursor, Selector};
use proto_tree_schema::{FieldId, MessageId, Schema};
use serde::{Deserialize, Serialize};

use crate::edit::{remove_field_value, set_field_value};
use crate::get::{is_resolvable, resolve, resolve_message};
use crate::navigate::{navigate, Direction};
use crate::validate::{check_message, check_write, field_descriptor_at};
use crate::value::{FieldValue, MessageValue};
use crate::TreeError;

/// A high-level edit intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Set { cursor: Cursor, value: FieldValue },
    Remove { cursor: Cursor },
    Select { cursor: Cursor },
    Move { direction: Direction },
}

#[derive(Debug, Clone)]
pub struct Session {
    schema: Arc<Schema>,
    message_id: MessageId,
    value: MessageValue,
    cursor: Cursor,
}

impl Session {
    /// Start editing an empty instance of message type `message_id`.
    pub fn new(schema: Arc<Schema>, message_id: MessageId) -> Result<Self, TreeError> {
        schema.message(message_id)?;
        Ok(Session {
            schema,
            message_id,
            value: MessageValue::new(),
            cursor: Cursor::new(),
        })
    }

    /// Start editing an existing instance, which must agree with the schema.
    pub fn with_value(schema: Arc<Schema>, message_id: MessageId, value: MessageValue) -> Result<Self, TreeError> {
        check_message(&schema, message_id, &value)?;
        Ok(Session {
            schema,
            message_id,
            value,
            cursor: Cursor::new(),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn value(&self) -> &MessageValue {
        &self.value
    }

    pub fn cursor(&self) -> &[Selector] {
        &self.cursor
    }

    pub fn into_value(self) -> MessageValue {
        self.value
    }

    /// Apply one action. On error the session is left as it was.
    pub fn apply(&mut self, action: Action) -> Result<(), TreeError> {
        tracing::debug!(?action, cursor = %format_cursor(&self.cursor), "apply");
        match action {
            Action::Set { cursor, value } => {
                check_write(&self.schema, self.message_id, &cursor, &value)?;
                self.value = set_field_value(&self.value, &cursor, value)?;
                self.cursor = cursor;
            }
            Action::Remove { cursor } => {
                self.value = remove_field_value(&self.value, &cursor)?;
                self.repair_cursor();
            }
            Action::Select { cursor } => {
                resolve(&self.value, &cursor)?;
                self.cursor = cursor;
            }
            Action::Move { direction } => {
                self.cursor = navigate(&self.value, &self.cursor, direction)?;
            }
        }
        Ok(())
    }

    /// Append the default value of field `field_id` to the message at
    /// `parent`, select it and return its cursor.
    pub fn append_default(&mut self, parent: &[Selector], field_id: FieldId) -> Result<Cursor, TreeError> {
        let len = resolve_message(&self.value, parent)?
            .values(field_id)
            .map_or(0, <[FieldValue]>::len);
        let cursor = child_cursor(parent, Selector::new(field_id, len));
        let descriptor = field_descriptor_at(&self.schema, self.message_id, &cursor)?;
        let value = FieldValue::default_for(&descriptor.field_type);
        self.apply(Action::Set {
            cursor: cursor.clone(),
            value,
        })?;
        Ok(cursor)
    }

    /// After a removal the selection may point past a compacted sequence or
    /// into a dropped field; walk up until it resolves again.
    fn repair_cursor(&mut self) {
        while !is_resolvable(&self.value, &self.cursor) {
            self.cursor = parent_of(&self.cursor);
        }
    }
}
