//! HTTP implementation of [`BookingSource`] backed by `ureq`.
//!
//! Requests are blocking and made one at a time. No retries and no
//! caching; a failed request is reported to the caller as-is.

use std::time::Duration;

use serde_json::{json, Value};
use staybook_core::{BookingSource, DateRange};
use tracing::debug;

use crate::config::UpstreamConfig;

/// Errors from talking to the reservation API.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("could not decode JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: ureq::Error,
    },
}

pub struct HttpBookingSource {
    agent: ureq::Agent,
    list_url: String,
    detail_url: String,
    auth: Option<(String, String)>,
}

impl HttpBookingSource {
    pub fn new(config: &UpstreamConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();
        let base = config.base_url.trim_end_matches('/');
        HttpBookingSource {
            agent: ureq::Agent::new_with_config(agent_config),
            list_url: format!("{}{}", base, config.list_path),
            detail_url: format!("{}{}", base, config.detail_path),
            auth: config.auth_header.clone().zip(config.auth_value.clone()),
        }
    }

    fn post(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        debug!(url, "upstream_request");
        let mut request = self.agent.post(url);
        if let Some((name, value)) = &self.auth {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request
            .send_json(body)
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;
        response
            .into_body()
            .read_json::<Value>()
            .map_err(|source| TransportError::Decode {
                url: url.to_string(),
                source,
            })
    }
}

impl BookingSource for HttpBookingSource {
    type Error = TransportError;

    fn fetch_bookings_by_date_range(&self, range: &DateRange) -> Result<Value, TransportError> {
        self.post(
            &self.list_url,
            &json!({"FromDate": range.from, "ToDate": range.to}),
        )
    }

    fn fetch_booking_by_reference_id(&self, reference_id: &str) -> Result<Value, TransportError> {
        self.post(
            &self.detail_url,
            &json!({"BookingReferenceId": reference_id}),
        )
    }
}
