use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{CatalogError, Result};

/// One labeled image: the file and the name of the folder it sits in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    pub path: PathBuf,
    pub label: String,
}

impl CatalogEntry {
    /// The file's base name, used as the selectable item name
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Scan `root` for `label/image` pairs.
///
/// Only first-level directories are labels and only their direct regular-file
/// children become entries; loose files under `root` and deeper directories
/// are skipped. Entries are ordered by label, then file name.
#[instrument(skip_all, fields(root = %root.as_ref().display()))]
pub fn build_catalog<P: AsRef<Path>>(root: P) -> Result<Vec<CatalogEntry>> {
    let root = root.as_ref();
    check_root(root)?;

    let mut entries = Vec::new();
    for label_dir in sorted_children(root)? {
        if !label_dir.is_dir() {
            debug!(path = %label_dir.display(), "skipping loose file under root");
            continue;
        }

        let label = match label_dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };

        let before = entries.len();
        entries.extend(
            sorted_children(&label_dir)?
                .into_iter()
                .filter(|path| path.is_file())
                .map(|path| CatalogEntry {
                    path,
                    label: label.clone(),
                }),
        );
        debug!(%label, images = entries.len() - before, "scanned label directory");
    }

    info!(entries = entries.len(), "built catalog");
    Ok(entries)
}

/// First entry whose display name matches; earlier labels win on duplicates
pub fn find_by_display_name<'a>(entries: &'a [CatalogEntry], name: &str) -> Option<&'a CatalogEntry> {
    entries.iter().find(|entry| entry.display_name() == name)
}

fn check_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CatalogError::RootNotDirectory {
            root: root.to_path_buf(),
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(CatalogError::RootNotFound {
            root: root.to_path_buf(),
        }),
        Err(err) => Err(CatalogError::io(root, err)),
    }
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = fs::read_dir(dir)
        .map_err(|err| CatalogError::io(dir, err))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|err| CatalogError::io(dir, err))?;
    children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(children)
}
