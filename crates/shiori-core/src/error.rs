use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShioriError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures surfaced by the catalog loader.
///
/// Both variants end up as a retry prompt on screen; they are kept apart
/// so callers can tell an empty catalog from a broken request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Fetch(String),

    #[error("no anime found in the catalog")]
    EmptyCatalog,
}
