use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl ShapeError {
    /// Path of the image this error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Decode { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShapeError>;
