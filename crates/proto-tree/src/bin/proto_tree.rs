//! `proto-tree`: query and edit a message tree document.
//!
//! Usage:
//!   proto-tree <command> [cursor] [value-json]
//!
//! The document is read from stdin for every command except `parent` and
//! `describe`. The schema is the built-in manifest schema unless
//! `PROTO_TREE_SCHEMA` names a schema JSON file. Set `RUST_LOG=debug` to
//! trace edits. Built with `--features cli`.

use proto_tree::cli::{load_schema, needs_document, run};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("First argument must be a command.");
        std::process::exit(1);
    };

    let schema_path = std::env::var("PROTO_TREE_SCHEMA").ok();
    let schema = match load_schema(schema_path.as_deref()) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if needs_document(command) {
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    match run(command, rest, buf.trim(), &schema) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = stdout.write_all(result.as_bytes()).and_then(|_| stdout.write_all(b"\n")) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
