use std::path::Path;
use std::process;

use staybook_core::{extract_bookings_with, normalize_with};

use super::{alias_table_or_exit, print_json, read_json_file, report_skipped};
use crate::config::Config;
use crate::render::{render_booking, render_listing};
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_normalize(
    file: &Path,
    list: bool,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let raw = read_json_file(file, output, quiet);
    let table = alias_table_or_exit(config, output, quiet);

    if list {
        let result = match extract_bookings_with(&raw, &table) {
            Ok(r) => r,
            Err(e) => {
                report_error(&format!("'{}': {}", file.display(), e), output, quiet);
                process::exit(1);
            }
        };
        report_skipped(&result.skipped, quiet);
        match output {
            OutputFormat::Text => print!("{}", render_listing(&result.bookings)),
            OutputFormat::Json => print_json(&result.bookings),
        }
        return;
    }

    let booking = match normalize_with(&raw, &table) {
        Ok(b) => b,
        Err(e) => {
            report_error(&format!("'{}': {}", file.display(), e), output, quiet);
            process::exit(1);
        }
    };
    match output {
        OutputFormat::Text => print!("{}", render_booking(&booking)),
        OutputFormat::Json => print_json(&booking),
    }
}
