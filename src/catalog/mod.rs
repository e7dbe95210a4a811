//! Remote catalog collaborator
//!
//! Maps a package identifier to human-readable metadata. Lookup failures are
//! expected (sideloaded apps, delisted apps, network trouble) and are local
//! to the one identifier; callers degrade that record instead of propagating.

pub mod play;

pub use play::PlayCatalog;

use async_trait::async_trait;
use thiserror::Error;

/// Metadata for one application, all fields required
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub developer: String,
    pub summary: String,
}

/// Why one lookup failed; never surfaced past the enrichment phase
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("catalog has no entry for this identifier")]
    NotFound,

    #[error("could not extract metadata from catalog response")]
    Malformed,
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Request(err.to_string())
    }
}

#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn lookup(&self, id: &str) -> Result<CatalogEntry, LookupError>;
}
