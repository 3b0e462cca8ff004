use thiserror::Error;

/// Non-fatal failures while loading remote catalog data. Callers surface
/// these as a banner and render an empty catalog instead of crashing.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to load {what} from the remote catalog")]
    DataFetch {
        what: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl CatalogError {
    pub fn data_fetch(what: &'static str, source: anyhow::Error) -> Self {
        Self::DataFetch { what, source }
    }
}

/// Failures of the favorites flow. All recoverable: `Unauthenticated` is a
/// user-facing prompt, `OperationFailed` means the optimistic flip was rolled
/// back and the error should be surfaced transiently. The core never retries.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("favorite actions require a signed-in user")]
    Unauthenticated,
    #[error("favorite update was rejected by the remote store")]
    OperationFailed(#[source] anyhow::Error),
}
