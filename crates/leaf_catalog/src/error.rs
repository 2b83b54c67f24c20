use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog root does not exist: {}", root.display())]
    RootNotFound { root: PathBuf },

    #[error("Catalog root is not a directory: {}", root.display())]
    RootNotDirectory { root: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// True when the root directory itself is unusable, as opposed to a
    /// failure partway through the scan
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::RootNotFound { .. } | Self::RootNotDirectory { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
