//! Command-line front end.
//!
//! Provides the logic behind the `proto-tree` binary. Documents are
//! [`MessageValue`]s in JSON; cursors use the `field[index].field[index]`
//! text form.
//!
//! | command    | arguments            | output                          |
//! |------------|----------------------|---------------------------------|
//! | `get`      | cursor               | value at cursor, JSON           |
//! | `parent`   | cursor               | cursor                          |
//! | `child`    | cursor               | cursor                          |
//! | `next`     | cursor               | cursor                          |
//! | `prev`     | cursor               | cursor                          |
//! | `set`      | cursor, value JSON   | edited document, JSON           |
//! | `remove`   | cursor               | edited document, JSON           |
//! | `list`     |                      | one line per populated position |
//! | `check`    | message id?          | `ok`                            |
//! | `describe` | message id?          | one line per declared field     |

use std::fs;

use proto_tree_cursor::{format_cursor, parent_of, parse_cursor, CursorError};
use proto_tree_schema::{
    manifest::MANIFEST, print_field_descriptor, rust_manifest_schema, MessageId, Schema, SchemaError,
};
use thiserror::Error;

use crate::edit::{remove_field_value, set_field_value};
use crate::get::{cursors, resolve};
use crate::navigate::{child_of, next_sibling, previous_sibling};
use crate::validate::check_message;
use crate::value::{FieldValue, MessageValue};
use crate::TreeError;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Cursor(#[from] CursorError),
    #[error("{0}")]
    Tree(#[from] TreeError),
    #[error("{0}")]
    Schema(#[from] SchemaError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Invalid message id: {0}")]
    InvalidMessageId(String),
    #[error("{0}")]
    Usage(&'static str),
}

// ── Setup ─────────────────────────────────────────────────────────────────

/// Load a schema document, or the built-in manifest schema when `path` is
/// `None`.
pub fn load_schema(path: Option<&str>) -> Result<Schema, CliError> {
    match path {
        Some(path) => Ok(Schema::from_json_str(&fs::read_to_string(path)?)?),
        None => Ok(rust_manifest_schema()),
    }
}

/// Whether `command` reads a document from stdin.
pub fn needs_document(command: &str) -> bool {
    !matches!(command, "parent" | "describe")
}

// ── Dispatch ──────────────────────────────────────────────────────────────

/// Run `command` with its `args` against the document text `input`.
pub fn run(command: &str, args: &[String], input: &str, schema: &Schema) -> Result<String, CliError> {
    match command {
        "get" => get(input, cursor_arg(args)?),
        "parent" => Ok(format_cursor(&parent_of(&parse_cursor(cursor_arg(args)?)?))),
        "child" => {
            let doc = MessageValue::from_json_str(input)?;
            Ok(format_cursor(&child_of(&doc, &parse_cursor(cursor_arg(args)?)?)?))
        }
        "next" => {
            let doc = MessageValue::from_json_str(input)?;
            Ok(format_cursor(&next_sibling(&doc, &parse_cursor(cursor_arg(args)?)?)?))
        }
        "prev" => {
            let doc = MessageValue::from_json_str(input)?;
            Ok(format_cursor(&previous_sibling(&doc, &parse_cursor(cursor_arg(args)?)?)?))
        }
        "set" => {
            let value_json = args.get(1).ok_or(CliError::Usage("set needs a cursor and a value"))?;
            set(input, cursor_arg(args)?, value_json)
        }
        "remove" => remove(input, cursor_arg(args)?),
        "list" => list(input),
        "check" => {
            let doc = MessageValue::from_json_str(input)?;
            check_message(schema, message_id_arg(args)?, &doc)?;
            Ok("ok".to_string())
        }
        "describe" => describe(schema, message_id_arg(args)?),
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

fn cursor_arg(args: &[String]) -> Result<&str, CliError> {
    args.first()
        .map(String::as_str)
        .ok_or(CliError::Usage("First argument must be a cursor."))
}

fn message_id_arg(args: &[String]) -> Result<MessageId, CliError> {
    match args.first() {
        Some(raw) => raw.parse().map_err(|_| CliError::InvalidMessageId(raw.clone())),
        None => Ok(MANIFEST),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────

/// Look up the value at `cursor` and print it as JSON.
pub fn get(input: &str, cursor: &str) -> Result<String, CliError> {
    let doc = MessageValue::from_json_str(input)?;
    let cursor = parse_cursor(cursor)?;
    let value = resolve(&doc, &cursor)?.to_field_value();
    Ok(serde_json::to_string(&value)?)
}

pub fn set(input: &str, cursor: &str, value_json: &str) -> Result<String, CliError> {
    let doc = MessageValue::from_json_str(input)?;
    let cursor = parse_cursor(cursor)?;
    let value: FieldValue = serde_json::from_str(value_json)?;
    Ok(set_field_value(&doc, &cursor, value)?.to_json_string()?)
}

pub fn remove(input: &str, cursor: &str) -> Result<String, CliError> {
    let doc = MessageValue::from_json_str(input)?;
    let cursor = parse_cursor(cursor)?;
    Ok(remove_field_value(&doc, &cursor)?.to_json_string()?)
}

/// One `<cursor>\t<value>` line per populated position; nested messages
/// print as `message`.
pub fn list(input: &str) -> Result<String, CliError> {
    let doc = MessageValue::from_json_str(input)?;
    let mut lines = Vec::new();
    for cursor in cursors(&doc) {
        let shown = match resolve(&doc, &cursor)?.value() {
            Some(value) if !value.is_message() => serde_json::to_string(value)?,
            _ => "message".to_string(),
        };
        lines.push(format!("{}\t{}", format_cursor(&cursor), shown));
    }
    Ok(lines.join("\n"))
}

/// `<field id> : <descriptor>` for every declared field, in declaration order.
pub fn describe(schema: &Schema, message_id: MessageId) -> Result<String, CliError> {
    let lines: Vec<String> = schema
        .message(message_id)?
        .fields
        .iter()
        .map(|(field_id, descriptor)| format!("{field_id} : {}", print_field_descriptor(descriptor)))
        .collect();
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"fields": {
        "44": [
            {"type": "string", "value": "hello_0"},
            {"type": "string", "value": "hello_1"}
        ],
        "45": [{"type": "message", "value": {"fields": {
            "51": [{"type": "number", "value": 3.5}]
        }}}]
    }}"#;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn run_on_doc(command: &str, items: &[&str]) -> Result<String, CliError> {
        run(command, &args(items), DOC, &rust_manifest_schema())
    }

    #[test]
    fn test_get() {
        assert_eq!(
            run_on_doc("get", &["44[1]"]).unwrap(),
            r#"{"type":"string","value":"hello_1"}"#
        );
        assert_eq!(
            run_on_doc("get", &["45[0].51[0]"]).unwrap(),
            r#"{"type":"number","value":3.5}"#
        );
        assert!(matches!(
            run_on_doc("get", &["46[0]"]),
            Err(CliError::Tree(TreeError::FieldNotFound(46)))
        ));
    }

    #[test]
    fn test_navigation_commands() {
        assert_eq!(run_on_doc("parent", &["45[0].51[0]"]).unwrap(), "45[0]");
        assert_eq!(run_on_doc("child", &[""]).unwrap(), "44[0]");
        assert_eq!(run_on_doc("next", &["44[1]"]).unwrap(), "45[0]");
        assert_eq!(run_on_doc("prev", &["45[0]"]).unwrap(), "44[1]");
        assert_eq!(run_on_doc("next", &["45[0]"]).unwrap(), "45[0]");
    }

    #[test]
    fn test_set_and_remove() {
        let out = run_on_doc("set", &["45[0].52[0]", r#"{"type":"boolean","value":true}"#]).unwrap();
        assert_eq!(get(&out, "45[0].52[0]").unwrap(), r#"{"type":"boolean","value":true}"#);

        let out = run_on_doc("remove", &["44[0]"]).unwrap();
        assert_eq!(get(&out, "44[0]").unwrap(), r#"{"type":"string","value":"hello_1"}"#);
        assert!(matches!(
            run_on_doc("set", &["44[0]"]),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_list() {
        assert_eq!(
            run_on_doc("list", &[]).unwrap(),
            "44[0]\t{\"type\":\"string\",\"value\":\"hello_0\"}\n\
             44[1]\t{\"type\":\"string\",\"value\":\"hello_1\"}\n\
             45[0]\tmessage\n\
             45[0].51[0]\t{\"type\":\"number\",\"value\":3.5}"
        );
    }

    #[test]
    fn test_describe() {
        let out = run("describe", &[], "", &rust_manifest_schema()).unwrap();
        assert_eq!(
            out,
            "1 : package: message 2\n\
             2 : dependencies: message 3\n\
             3 : field_3: string\n\
             4 : field_4: message 2"
        );
        assert_eq!(
            run("describe", &args(&["3"]), "", &rust_manifest_schema()).unwrap(),
            "1 : name: string\n2 : version: string\n3 : registry: string"
        );
        assert!(matches!(
            run("describe", &args(&["9"]), "", &rust_manifest_schema()),
            Err(CliError::Schema(SchemaError::MessageNotFound(9)))
        ));
        assert!(matches!(
            run("describe", &args(&["x"]), "", &rust_manifest_schema()),
            Err(CliError::InvalidMessageId(_))
        ));
    }

    #[test]
    fn test_check() {
        let doc = r#"{"fields": {"3": [{"type": "string", "value": "a"}]}}"#;
        assert_eq!(run("check", &[], doc, &rust_manifest_schema()).unwrap(), "ok");
        // Field 44 is not declared by the manifest.
        assert!(matches!(
            run_on_doc("check", &[]),
            Err(CliError::Tree(TreeError::FieldNotFound(44)))
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            run_on_doc("frobnicate", &[]),
            Err(CliError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_load_schema_default() {
        let schema = load_schema(None).unwrap();
        assert_eq!(schema, rust_manifest_schema());
        assert!(matches!(
            load_schema(Some("/nonexistent/schema.json")),
            Err(CliError::Io(_))
        ));
    }
}
