use std::process;

use staybook_core::{list_bookings, DateRange};

use super::{alias_table_or_exit, print_json, report_skipped};
use crate::config::Config;
use crate::render::render_listing;
use crate::transport::HttpBookingSource;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_fetch(from: &str, to: &str, config: &Config, output: OutputFormat, quiet: bool) {
    let range = match DateRange::from_days(from, to) {
        Ok(r) => r,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };
    let upstream = match config.upstream() {
        Ok(u) => u,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let table = alias_table_or_exit(config, output, quiet);
    let source = HttpBookingSource::new(upstream);

    let result = match list_bookings(&source, &range, &table) {
        Ok(r) => r,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };
    report_skipped(&result.skipped, quiet);
    match output {
        OutputFormat::Text => print!("{}", render_listing(&result.bookings)),
        OutputFormat::Json => print_json(&result.bookings),
    }
}
