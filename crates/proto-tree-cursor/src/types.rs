//! Type definitions for cursors.

use std::fmt;

use proto_tree_schema::FieldId;
use serde::{Deserialize, Serialize};

/// One step of a cursor: the value at `index` inside the sequence stored
/// under `field_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Selector {
    pub field_id: FieldId,
    pub index: usize,
}

impl Selector {
    pub fn new(field_id: FieldId, index: usize) -> Self {
        Selector { field_id, index }
    }

    /// Same field, different position.
    pub fn at(self, index: usize) -> Self {
        Selector {
            field_id: self.field_id,
            index,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.field_id, self.index)
    }
}

impl From<(FieldId, usize)> for Selector {
    fn from((field_id, index): (FieldId, usize)) -> Self {
        Selector { field_id, index }
    }
}

/// A root-to-leaf path of selectors. The empty cursor is the root message.
pub type Cursor = Vec<Selector>;
