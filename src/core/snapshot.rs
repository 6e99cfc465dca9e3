//! Rate snapshot and conversion result types

use crate::core::error::FxError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One complete set of exchange rates as published by the provider on a
/// given date. Every rate is expressed as units of that currency per one
/// unit of `base`. A refresh replaces the whole snapshot; it is never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub base: String,
    pub date: NaiveDate,
    pub rates: HashMap<String, f64>,
}

impl RateSnapshot {
    /// Builds a snapshot from provider data. Rate keys are normalized to
    /// uppercase; an empty rate map is rejected so a bad payload never
    /// replaces usable rates.
    pub fn new(
        base: &str,
        date: NaiveDate,
        rates: HashMap<String, f64>,
    ) -> Result<Self, FxError> {
        if rates.is_empty() {
            return Err(FxError::RefreshFailed(
                "provider returned an empty rate map".to_string(),
            ));
        }
        let rates = rates
            .into_iter()
            .map(|(code, rate)| (code.to_uppercase(), rate))
            .collect();
        Ok(RateSnapshot {
            base: base.to_uppercase(),
            date,
            rates,
        })
    }

    /// A snapshot is fresh if it was published today or yesterday (UTC).
    /// The one-day grace window tolerates provider publish lag across the
    /// UTC day boundary. Anything else, including a future date, is stale.
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.date == today || Some(self.date) == today.checked_sub_days(Days::new(1))
    }
}

/// Result of a single conversion. Carries the publish date of the snapshot
/// the rates came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeAmount {
    pub exchange_date: NaiveDate,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
}
