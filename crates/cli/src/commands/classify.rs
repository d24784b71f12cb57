use std::path::Path;
use std::process;

use staybook_core::{classify_lookup_with, LookupOutcome};

use super::{alias_table_or_exit, print_json, read_json_file};
use crate::config::Config;
use crate::render::render_outcome;
use crate::{report_error, OutputFormat};

/// Classify a saved detail-lookup envelope. Malformed envelopes exit 1.
pub(crate) fn cmd_classify(
    file: &Path,
    reference_id: &str,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let envelope = read_json_file(file, output, quiet);
    let table = alias_table_or_exit(config, output, quiet);
    let outcome = classify_lookup_with(&envelope, reference_id, &table);
    emit_outcome(&outcome, output, quiet);
}

/// Print an outcome; shared with `lookup`.
pub(crate) fn emit_outcome(outcome: &LookupOutcome, output: OutputFormat, quiet: bool) {
    if outcome.is_malformed() {
        match output {
            OutputFormat::Text => {
                report_error(render_outcome(outcome).trim_end(), output, quiet);
            }
            OutputFormat::Json => print_json(outcome),
        }
        process::exit(1);
    }
    match output {
        OutputFormat::Text => print!("{}", render_outcome(outcome)),
        OutputFormat::Json => print_json(outcome),
    }
}
