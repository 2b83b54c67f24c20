use std::path::{Path, PathBuf};

use leaf_catalog::{find_by_display_name, Catalog, CatalogCache, CatalogEntry};
use leaf_shape::{extract_features, extract_features_batch, ShapeMeasurement};
use serde::Serialize;
use tracing::{info, warn};

use crate::{LeafScanConfig, LeafScanError, Result};

/// A selected catalog entry together with its measurement
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub entry: CatalogEntry,
    pub measurement: ShapeMeasurement,
}

/// One line of a survey: either a measurement or the reason it failed
#[derive(Debug, Clone, Serialize)]
pub struct SurveyRow {
    pub path: PathBuf,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<ShapeMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The host side of the library: one dataset root, its cached catalog, and
/// on-demand measurement of selected entries
#[derive(Debug)]
pub struct LeafSession {
    root: PathBuf,
    cache: CatalogCache,
}

impl LeafSession {
    pub fn new(config: LeafScanConfig) -> Self {
        Self {
            root: config.root_dir,
            cache: CatalogCache::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The catalog for this session's root, scanned on first use
    pub fn catalog(&self) -> Result<Catalog> {
        Ok(self.cache.get_or_build(&self.root)?)
    }

    /// Rescan the root, discarding the cached catalog
    pub fn refresh(&self) -> Result<Catalog> {
        info!(root = %self.root.display(), "refreshing catalog");
        Ok(self.cache.refresh(&self.root)?)
    }

    /// Measure a single image
    pub fn measure<P: AsRef<Path>>(&self, path: P) -> Result<ShapeMeasurement> {
        Ok(extract_features(path)?)
    }

    /// Find an entry by its display name and measure it
    pub fn inspect(&self, name: &str) -> Result<Inspection> {
        let catalog = self.catalog()?;
        let entry = find_by_display_name(&catalog, name)
            .cloned()
            .ok_or_else(|| LeafScanError::EntryNotFound(name.to_string()))?;
        let measurement = self.measure(&entry.path)?;
        Ok(Inspection { entry, measurement })
    }

    /// Measure every entry in parallel. Per-image failures are recorded in
    /// their row and do not stop the survey.
    pub fn survey(&self) -> Result<Vec<SurveyRow>> {
        let catalog = self.catalog()?;
        let paths: Vec<&Path> = catalog.iter().map(|entry| entry.path.as_path()).collect();
        let results = extract_features_batch(&paths);

        let rows = catalog
            .iter()
            .zip(results)
            .map(|(entry, result)| match result {
                Ok(measurement) => SurveyRow {
                    path: entry.path.clone(),
                    label: entry.label.clone(),
                    measurement: Some(measurement),
                    error: None,
                },
                Err(err) => {
                    warn!("Skipping {}: {}", entry.path.display(), err);
                    SurveyRow {
                        path: entry.path.clone(),
                        label: entry.label.clone(),
                        measurement: None,
                        error: Some(err.to_string()),
                    }
                }
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use std::fs;
    use tempfile::TempDir;

    fn dataset() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("bird_eye_spot")).unwrap();
        fs::create_dir_all(root.join("white_spot")).unwrap();

        let mut leaf = GrayImage::from_pixel(80, 80, Luma([250u8]));
        for y in 10..70 {
            for x in 20..50 {
                leaf.put_pixel(x, y, Luma([20u8]));
            }
        }
        leaf.save(root.join("bird_eye_spot/leaf.png")).unwrap();
        GrayImage::from_pixel(16, 16, Luma([255u8]))
            .save(root.join("white_spot/blank.png"))
            .unwrap();
        fs::write(root.join("white_spot/notes.png"), b"not an image").unwrap();
        dir
    }

    #[test]
    fn test_inspect_by_name() {
        let dir = dataset();
        let session = LeafSession::new(LeafScanConfig::new(dir.path()));

        let inspection = session.inspect("leaf.png").unwrap();
        assert_eq!(inspection.entry.label, "bird_eye_spot");
        let record = inspection.measurement.record().expect("leaf should be measured");
        assert_eq!((record.width, record.height), (30, 60));

        let blank = session.inspect("blank.png").unwrap();
        assert!(blank.measurement.is_no_feature());
    }

    #[test]
    fn test_inspect_reports_decode_and_lookup_failures() {
        let dir = dataset();
        let session = LeafSession::new(LeafScanConfig::new(dir.path()));

        assert!(matches!(session.inspect("notes.png"), Err(LeafScanError::Shape(_))));
        assert!(matches!(session.inspect("absent.png"), Err(LeafScanError::EntryNotFound(_))));
    }

    #[test]
    fn test_survey_continues_past_bad_files() {
        let dir = dataset();
        let session = LeafSession::new(LeafScanConfig::new(dir.path()));

        let rows = session.survey().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(matches!(rows[0].measurement, Some(ShapeMeasurement::Shape(_))));
        assert_eq!(rows[1].measurement, Some(ShapeMeasurement::NoFeature));
        assert!(rows[2].measurement.is_none());
        assert!(rows[2].error.is_some());
    }

    #[test]
    fn test_bad_root_is_surfaced() {
        let dir = TempDir::new().unwrap();
        let session = LeafSession::new(LeafScanConfig::new(dir.path().join("missing")));

        match session.catalog() {
            Err(LeafScanError::Catalog(err)) => assert!(err.is_config_error()),
            other => panic!("expected a catalog config error, got {other:?}"),
        }
    }

    #[test]
    fn test_refresh_picks_up_new_files() {
        let dir = dataset();
        let session = LeafSession::new(LeafScanConfig::new(dir.path()));

        assert_eq!(session.catalog().unwrap().len(), 3);
        fs::write(dir.path().join("white_spot/late.jpg"), b"img").unwrap();
        assert_eq!(session.catalog().unwrap().len(), 3);
        assert_eq!(session.refresh().unwrap().len(), 4);
    }
}
