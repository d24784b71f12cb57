use std::process;

use staybook_core::lookup_booking;

use super::alias_table_or_exit;
use super::classify::emit_outcome;
use crate::config::Config;
use crate::transport::HttpBookingSource;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_lookup(reference_id: &str, config: &Config, output: OutputFormat, quiet: bool) {
    let reference_id = reference_id.trim();
    if reference_id.is_empty() {
        report_error("reference ID must not be empty", output, quiet);
        process::exit(1);
    }
    let upstream = match config.upstream() {
        Ok(u) => u,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let table = alias_table_or_exit(config, output, quiet);
    let source = HttpBookingSource::new(upstream);

    match lookup_booking(&source, reference_id, &table) {
        Ok(outcome) => emit_outcome(&outcome, output, quiet),
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    }
}
