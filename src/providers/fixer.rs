use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::error::FxError;
use crate::core::provider::RateProvider;
use crate::core::snapshot::RateSnapshot;

/// Fetches the latest rates from a fixer.io style endpoint. The provider
/// publishes every rate relative to a fixed base currency once per day.
pub struct FixerProvider {
    base_url: String,
    timeout: Duration,
}

impl FixerProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        FixerProvider {
            base_url: base_url.to_string(),
            timeout,
        }
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesPayload {
    success: bool,
    base: String,
    date: NaiveDate,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for FixerProvider {
    #[instrument(name = "RatesFetch", skip(self))]
    async fn fetch_latest(&self) -> Result<RateSnapshot, FxError> {
        let url = format!("{}/latest", self.base_url);
        debug!("Requesting latest rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxr/0.2")
            .timeout(self.timeout)
            .build()
            .map_err(|e| FxError::RefreshFailed(e.to_string()))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| FxError::RefreshFailed(format!("Request error: {e} for URL: {url}")))?;

        if !response.status().is_success() {
            return Err(FxError::RefreshFailed(format!(
                "HTTP error: {} from provider",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FxError::RefreshFailed(e.to_string()))?;

        let payload: LatestRatesPayload = serde_json::from_str(&text)
            .map_err(|e| FxError::RefreshFailed(format!("Failed to parse rates payload: {e}")))?;

        if !payload.success {
            return Err(FxError::RefreshFailed(
                "provider reported an unsuccessful response".to_string(),
            ));
        }

        debug!(
            base = %payload.base,
            date = %payload.date,
            count = payload.rates.len(),
            "Parsed rates payload"
        );
        RateSnapshot::new(&payload.base, payload.date, payload.rates)
    }
}
