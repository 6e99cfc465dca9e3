//! Error taxonomy for rate lookup and conversion

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    /// Conversion amount was missing, zero, negative or non-finite.
    #[error("amount must be greater than 0")]
    InvalidAmount,

    /// A currency code is not present in the current rate snapshot.
    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),

    /// Fetching or parsing a fresh snapshot from the provider failed.
    /// Transport errors, non-success responses, unparseable payloads and
    /// empty rate maps all collapse into this one kind.
    #[error("failed to refresh rates: {0}")]
    RefreshFailed(String),

    /// The persisted rates file could not be read or written for reasons
    /// other than simple absence.
    #[error("rates storage unavailable: {0}")]
    StorageUnavailable(String),
}
