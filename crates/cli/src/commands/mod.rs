pub(crate) mod classify;
pub(crate) mod fetch;
pub(crate) mod lookup;
pub(crate) mod normalize;
pub(crate) mod validate;

use std::path::Path;
use std::process;

use serde::Serialize;
use staybook_core::AliasTable;

use crate::config::Config;
use crate::{report_error, OutputFormat};

/// Read and parse a JSON file, exiting with a reported error on failure.
pub(crate) fn read_json_file(path: &Path, output: OutputFormat, quiet: bool) -> serde_json::Value {
    let src = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    match serde_json::from_str(&src) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn alias_table_or_exit(config: &Config, output: OutputFormat, quiet: bool) -> AliasTable {
    match config.alias_table() {
        Ok(table) => table,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("error: could not serialize output: {}", e);
            process::exit(1);
        }
    }
}

/// Warn about list entries that could not be normalized.
pub(crate) fn report_skipped(skipped: &[staybook_core::SkippedEntry], quiet: bool) {
    if quiet {
        return;
    }
    for entry in skipped {
        eprintln!("warning: skipped entry {}: {}", entry.index, entry.reason);
    }
}
