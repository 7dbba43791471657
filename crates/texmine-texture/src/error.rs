use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeriveError {
    #[error("no recipe ingredient has an existing base texture")]
    BaseNotFound,

    #[error("unrecognized recipe format: {0}")]
    MalformedRecipe(String),

    #[error("malformed texture metadata: {0}")]
    Metadata(String),

    #[error("failed to process image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DeriveError {
    /// Whether this failure is scoped to a single derived-texture entry.
    /// Per-entry failures are logged and skipped; IO and image errors
    /// abort the whole run.
    pub fn is_per_entry(&self) -> bool {
        matches!(
            self,
            DeriveError::BaseNotFound | DeriveError::MalformedRecipe(_)
        )
    }
}
