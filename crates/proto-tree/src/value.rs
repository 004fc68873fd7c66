//! Runtime values of a message tree.
//!
//! A [`MessageValue`] maps field ids to the ordered sequence of values stored
//! under them. A field that was never populated has no entry at all; an
//! entry with an empty sequence is never kept.

use indexmap::IndexMap;
use proto_tree_schema::{FieldId, FieldType};
use serde::{Deserialize, Deserializer, Serialize};

/// One value occupying a field slot: a scalar or a nested message.
///
/// Serialized as `{"type": "string", "value": "..."}` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Message(MessageValue),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Number(_) => "number",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Message(_) => "message",
        }
    }

    /// The value an "add" gesture inserts for a field of type `field_type`.
    pub fn default_for(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::String => FieldValue::String(String::new()),
            FieldType::Number => FieldValue::Number(0.0),
            FieldType::Boolean => FieldValue::Boolean(false),
            FieldType::Message { .. } => FieldValue::Message(MessageValue::new()),
        }
    }

    /// Whether the variant agrees with a declared field type. Nested message
    /// contents are not inspected.
    pub fn matches(&self, field_type: &FieldType) -> bool {
        matches!(
            (self, field_type),
            (FieldValue::String(_), FieldType::String)
                | (FieldValue::Number(_), FieldType::Number)
                | (FieldValue::Boolean(_), FieldType::Boolean)
                | (FieldValue::Message(_), FieldType::Message { .. })
        )
    }

    pub fn as_message(&self) -> Option<&MessageValue> {
        match self {
            FieldValue::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self, FieldValue::Message(_))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<MessageValue> for FieldValue {
    fn from(m: MessageValue) -> Self {
        FieldValue::Message(m)
    }
}

/// A message instance: field id to the values stored under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageValue {
    #[serde(default, deserialize_with = "deserialize_fields")]
    pub fields: IndexMap<FieldId, Vec<FieldValue>>,
}

impl MessageValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self, field_id: FieldId) -> Option<&[FieldValue]> {
        self.fields.get(&field_id).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Ids of fields holding at least one value, ascending.
    ///
    /// This numeric order drives child and sibling navigation; it is not the
    /// schema's declaration order.
    pub fn populated_field_ids(&self) -> Vec<FieldId> {
        let mut ids: Vec<FieldId> = self
            .fields
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FromIterator<(FieldId, Vec<FieldValue>)> for MessageValue {
    fn from_iter<I: IntoIterator<Item = (FieldId, Vec<FieldValue>)>>(iter: I) -> Self {
        let fields = iter.into_iter().filter(|(_, values)| !values.is_empty()).collect();
        MessageValue { fields }
    }
}

fn deserialize_fields<'de, D>(deserializer: D) -> Result<IndexMap<FieldId, Vec<FieldValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut fields = IndexMap::<FieldId, Vec<FieldValue>>::deserialize(deserializer)?;
    fields.retain(|_, values| !values.is_empty());
    Ok(fields)
}

// ── Constructors ──────────────────────────────────────────────────────────

pub fn string_value(value: impl Into<String>) -> FieldValue {
    let value: String = value.into();
    value.into()
}

pub fn number_value(value: f64) -> FieldValue {
    value.into()
}

pub fn boolean_value(value: bool) -> FieldValue {
    value.into()
}

/// Build a message value from `(field id, values)` pairs, e.g. produced by
/// [`field`]. Pairs with no values are dropped.
pub fn message_value<I>(fields: I) -> FieldValue
where
    I: IntoIterator<Item = (FieldId, Vec<FieldValue>)>,
{
    fields.into_iter().collect::<MessageValue>().into()
}

pub fn field<I>(field_id: FieldId, values: I) -> (FieldId, Vec<FieldValue>)
where
    I: IntoIterator<Item = FieldValue>,
{
    (field_id, values.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversions() {
        assert_eq!(FieldValue::from("a"), string_value("a"));
        assert_eq!(FieldValue::from(String::from("a")).as_str(), Some("a"));
        assert_eq!(FieldValue::from(2.5), number_value(2.5));
        assert_eq!(FieldValue::from(true), boolean_value(true));
        let nested = FieldValue::from(MessageValue::new());
        assert!(nested.is_message());
        assert_eq!(nested.as_str(), None);
        assert!(!FieldValue::from(1.0).is_message());
    }

    #[test]
    fn test_default_for() {
        assert_eq!(FieldValue::default_for(&FieldType::String), string_value(""));
        assert_eq!(FieldValue::default_for(&FieldType::Number), number_value(0.0));
        assert_eq!(FieldValue::default_for(&FieldType::Boolean), boolean_value(false));
        assert_eq!(
            FieldValue::default_for(&FieldType::Message { message_id: 2 }),
            FieldValue::Message(MessageValue::new())
        );
    }

    #[test]
    fn test_matches() {
        let msg = FieldType::Message { message_id: 1 };
        assert!(string_value("x").matches(&FieldType::String));
        assert!(!string_value("x").matches(&FieldType::Number));
        assert!(number_value(1.5).matches(&FieldType::Number));
        assert!(boolean_value(true).matches(&FieldType::Boolean));
        assert!(message_value([]).matches(&msg));
        assert!(!boolean_value(true).matches(&msg));
    }

    #[test]
    fn test_message_value_drops_empty_fields() {
        let FieldValue::Message(m) = message_value([field(1, []), field(2, [string_value("a")])]) else {
            panic!("expected a message");
        };
        assert_eq!(m.fields.len(), 1);
        assert!(m.values(1).is_none());
        assert_eq!(m.values(2), Some(&[string_value("a")][..]));
    }

    #[test]
    fn test_populated_field_ids_sorted() {
        let m: MessageValue = [
            field(51, [string_value("b")]),
            field(50, [string_value("a")]),
            field(52, [string_value("c")]),
        ]
        .into_iter()
        .collect();
        assert_eq!(m.populated_field_ids(), vec![50, 51, 52]);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a: MessageValue = [field(1, [number_value(1.0)]), field(2, [number_value(2.0)])]
            .into_iter()
            .collect();
        let b: MessageValue = [field(2, [number_value(2.0)]), field(1, [number_value(1.0)])]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_shape() {
        let v = message_value([
            field(44, [string_value("hello")]),
            field(45, [message_value([field(50, [boolean_value(true)])])]),
        ]);
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({
                "type": "message",
                "value": {"fields": {
                    "44": [{"type": "string", "value": "hello"}],
                    "45": [{"type": "message", "value": {"fields": {
                        "50": [{"type": "boolean", "value": true}]
                    }}}]
                }}
            })
        );
    }

    #[test]
    fn test_deserialize_prunes_empty_sequences() {
        let m = MessageValue::from_json_str(
            r#"{"fields": {"1": [], "2": [{"type": "number", "value": 3}]}}"#,
        )
        .unwrap();
        assert_eq!(m.populated_field_ids(), vec![2]);
        assert!(!m.fields.contains_key(&1));
        assert_eq!(m.values(2), Some(&[number_value(3.0)][..]));
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let m = MessageValue::from_json_str("{}").unwrap();
        assert!(m.is_empty());
    }
}
