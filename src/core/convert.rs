//! Currency conversion over a rate snapshot
//!
//! The snapshot only stores rates relative to its base currency, so a
//! conversion between two non-base currencies pivots through the base:
//! divide by the source rate to reach base units, multiply by the target
//! rate.

use crate::core::error::FxError;
use crate::core::snapshot::{ExchangeAmount, RateSnapshot};

/// Returns every currency code in the snapshot, sorted. An empty rate map
/// yields an empty list, not an error.
pub fn list_currencies(snapshot: &RateSnapshot) -> Vec<String> {
    let mut currencies: Vec<String> = snapshot.rates.keys().cloned().collect();
    currencies.sort();
    currencies
}

/// Converts `amount` of `from` into `to` using the snapshot's rates.
///
/// The amount must be finite and strictly positive. Currency codes are
/// matched case-insensitively; an unknown code on either side fails with
/// the offending code in the error.
pub fn convert(
    snapshot: &RateSnapshot,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<ExchangeAmount, FxError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(FxError::InvalidAmount);
    }

    let from = from.to_uppercase();
    let to = to.to_uppercase();

    let from_rate = snapshot
        .rates
        .get(&from)
        .ok_or_else(|| FxError::InvalidCurrency(from.clone()))?;
    let to_rate = snapshot
        .rates
        .get(&to)
        .ok_or_else(|| FxError::InvalidCurrency(to.clone()))?;

    let base_amount = amount / from_rate;
    let converted = base_amount * to_rate;

    Ok(ExchangeAmount {
        exchange_date: snapshot.date,
        from_currency: from,
        to_currency: to,
        amount: converted,
    })
}
