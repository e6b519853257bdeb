//! Error type surfaced by wallet analysis.

use thiserror::Error;

/// An upstream data fetch failed and the analysis was aborted.
///
/// Every provider failure (network, rate limit, rejected address, malformed
/// response) collapses into this one type; callers present a generic message
/// and may re-run the analysis.
#[derive(Error, Debug)]
#[error("provider call {operation} failed: {source}")]
pub struct ProviderError {
    /// Provider operation that failed, e.g. `getAssetTransfers`.
    pub operation: &'static str,
    #[source]
    pub source: chain_core::Error,
}

impl ProviderError {
    pub fn new(operation: &'static str, source: chain_core::Error) -> Self {
        Self { operation, source }
    }
}
