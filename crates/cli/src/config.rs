//! Configuration file format for `staybook`.
//!
//! Every section is optional. The upstream section is only needed by
//! the commands that talk to the reservation API.
//!
//! # Example
//!
//! ```toml
//! log_level = "info"
//!
//! [upstream]
//! base_url = "https://booking.example.com/api"
//! list_path = "/BookingDetailsBasedOnDate"
//! detail_path = "/BookingDetail"
//! timeout_secs = 30
//! auth_header = "Authorization"
//! auth_value = "Basic dXNlcjpwYXNz"
//!
//! [aliases]
//! checkInDate = ["Checkin", "CheckIn", "ArrivalDate"]
//! totalPrice = ["room:TotalFare", "BookingPrice", "NetAmount"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use staybook_core::AliasTable;

pub(crate) const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    pub upstream: Option<UpstreamConfig>,
    /// Per-field alias overrides, keyed by canonical field name.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

/// `[upstream]` section: where the reservation API lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    pub base_url: String,
    #[serde(default = "default_list_path")]
    pub list_path: String,
    #[serde(default = "default_detail_path")]
    pub detail_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// HTTP header name carrying credentials, if the upstream wants one.
    pub auth_header: Option<String>,
    pub auth_value: Option<String>,
}

fn default_list_path() -> String {
    "/BookingDetailsBasedOnDate".to_string()
}

fn default_detail_path() -> String {
    "/BookingDetail".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Read and parse a config file, or return defaults when no path is given.
///
/// Returns a human-readable error string on failure.
pub fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// The built-in alias table with this config's overrides applied.
    pub fn alias_table(&self) -> Result<AliasTable, String> {
        AliasTable::with_overrides(&self.aliases).map_err(|e| format!("[aliases]: {}", e))
    }

    /// The upstream section, required by commands that make requests.
    pub fn upstream(&self) -> Result<&UpstreamConfig, String> {
        self.upstream
            .as_ref()
            .ok_or_else(|| "no [upstream] section in config (pass --config <file>)".to_string())
    }

    fn validate(&self) -> Result<(), String> {
        self.alias_table()?;
        if let Some(upstream) = &self.upstream {
            if upstream.base_url.trim().is_empty() {
                return Err("[upstream]: base_url must not be empty".to_string());
            }
            if upstream.auth_header.is_some() != upstream.auth_value.is_some() {
                return Err(
                    "[upstream]: auth_header and auth_value must be set together".to_string(),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staybook_core::{CanonicalField, FieldSource};
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_no_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.log_level(), "warn");
        assert!(config.upstream().is_err());
        assert_eq!(config.alias_table().unwrap(), AliasTable::default());
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"
log_level = "debug"

[upstream]
base_url = "https://booking.example.com/api"
timeout_secs = 5
auth_header = "Authorization"
auth_value = "Basic abc"

[aliases]
checkInDate = ["ArrivalDate", "Checkin"]
"#,
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.log_level(), "debug");

        let upstream = config.upstream().unwrap();
        assert_eq!(upstream.list_path, "/BookingDetailsBasedOnDate");
        assert_eq!(upstream.detail_path, "/BookingDetail");
        assert_eq!(upstream.timeout_secs, 5);

        let table = config.alias_table().unwrap();
        assert_eq!(
            table.candidates(CanonicalField::CheckInDate),
            &[FieldSource::booking("ArrivalDate"), FieldSource::booking("Checkin")]
        );
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let unknown_field = write_config("[aliases]\narrival = [\"X\"]\n");
        let err = load_config(Some(unknown_field.path())).unwrap_err();
        assert!(err.contains("unknown canonical field"), "{}", err);

        let half_auth = write_config(
            "[upstream]\nbase_url = \"http://x\"\nauth_header = \"Authorization\"\n",
        );
        let err = load_config(Some(half_auth.path())).unwrap_err();
        assert!(err.contains("auth_header and auth_value"), "{}", err);

        let typo = write_config("[upstrem]\nbase_url = \"http://x\"\n");
        assert!(load_config(Some(typo.path())).is_err());

        assert!(load_config(Some(Path::new("/nonexistent/staybook.toml"))).is_err());
    }
}
