use thiserror::Error;

use crate::ports::outbound::catalog::StoreError;
use crate::scryfall::fetcher::FetchError;

/// Errors raised while synchronizing the local catalog with the
/// remote masterdata service.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid collector number {0:?}")]
    InvalidCollectorNumber(String),
    #[error("set {code:?} ({set_type}) is not in the catalog")]
    SetNotInDatabase { code: String, set_type: String },
    #[error("could not resolve variant {collector_number:?}: {reason}")]
    VariantResolution {
        collector_number: String,
        reason: String,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to decode record: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
