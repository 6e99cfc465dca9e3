//! Rate provider abstraction

use crate::core::error::FxError;
use crate::core::snapshot::RateSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest published rates from the remote provider. Any
    /// transport or payload problem surfaces as `FxError::RefreshFailed`.
    async fn fetch_latest(&self) -> Result<RateSnapshot, FxError>;
}
