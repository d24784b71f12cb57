use std::path::Path;
use std::process;

use super::read_json_file;
use crate::{report_error, OutputFormat};

static CANONICAL_SCHEMA_STR: &str = include_str!("../../../../schema/canonical-booking-schema.json");

/// Validate canonical JSON (one booking or an array of them) against the
/// embedded canonical booking schema.
pub(crate) fn cmd_validate(file: &Path, output: OutputFormat, quiet: bool) {
    let schema: serde_json::Value = match serde_json::from_str(CANONICAL_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("internal error: failed to parse embedded schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("internal error: failed to compile schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc = read_json_file(file, output, quiet);
    let errors: Vec<String> = validator
        .iter_errors(&doc)
        .map(|e| format!("{}", e))
        .collect();

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{}", serde_json::json!({ "valid": true })),
            }
        }
        return;
    }

    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("invalid");
                for err in &errors {
                    eprintln!("  - {}", err);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({ "valid": false, "errors": errors });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
    process::exit(1);
}
