pub mod report;
pub mod session;

pub use report::render_measurement;
pub use session::{Inspection, LeafSession, SurveyRow};

use leaf_catalog::CatalogError;
use leaf_shape::ShapeError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeafScanError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Missing catalog root: pass --root or a config file with 'root_dir'")]
    MissingRoot,
    #[error("No catalog entry named '{0}'")]
    EntryNotFound(String),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

pub type Result<T> = std::result::Result<T, LeafScanError>;

/// Host configuration: where the labeled dataset lives
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LeafScanConfig {
    pub root_dir: PathBuf,
}

impl LeafScanConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Pick the catalog root: an explicit root wins over the config file
    pub fn resolve(root: Option<PathBuf>, config_file: Option<&Path>) -> Result<Self> {
        match (root, config_file) {
            (Some(root), _) => Ok(Self::new(root)),
            (None, Some(path)) => Self::from_file(path),
            (None, None) => Err(LeafScanError::MissingRoot),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(LeafScanError::UnsupportedFileFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_from_toml_and_json() {
        let toml = LeafScanConfig::from_toml("root_dir = \"/data/tea_sickness_dataset\"").unwrap();
        let json = LeafScanConfig::from_json(r#"{"root_dir": "/data/tea_sickness_dataset"}"#).unwrap();

        assert_eq!(toml, json);
        assert_eq!(toml.root_dir, PathBuf::from("/data/tea_sickness_dataset"));
    }

    #[test]
    fn test_config_files_by_extension() {
        let dir = TempDir::new().unwrap();
        let toml_path = dir.path().join("leafscan.toml");
        let json_path = dir.path().join("leafscan.json");
        fs::write(&toml_path, "root_dir = \"/data/leaves\"\n").unwrap();
        fs::write(&json_path, r#"{"root_dir": "/data/leaves"}"#).unwrap();

        let expected = LeafScanConfig::new("/data/leaves");
        assert_eq!(LeafScanConfig::from_file(&toml_path).unwrap(), expected);
        assert_eq!(LeafScanConfig::from_file(&json_path).unwrap(), expected);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = LeafScanConfig::from_file("leafscan.yaml").unwrap_err();
        assert!(matches!(err, LeafScanError::UnsupportedFileFormat));
    }

    #[test]
    fn test_explicit_root_wins() {
        let config =
            LeafScanConfig::resolve(Some(PathBuf::from("/cli/root")), Some(Path::new("ignored.toml"))).unwrap();
        assert_eq!(config.root_dir, PathBuf::from("/cli/root"));

        let err = LeafScanConfig::resolve(None, None).unwrap_err();
        assert!(matches!(err, LeafScanError::MissingRoot));
    }

    #[test]
    fn test_missing_root_dir_key_is_an_error() {
        assert!(matches!(
            LeafScanConfig::from_toml("dataset = \"x\"").unwrap_err(),
            LeafScanError::TomlDeError(_)
        ));
    }
}
