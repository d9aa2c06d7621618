use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{CatalogError, Result};
use crate::ingest::RawItem;
use crate::types::Asset;

/// Default extensions recognized as image assets
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Settings for building an asset manifest from a directory tree
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File extensions (lowercase, no dot) accepted as assets
    pub extensions: Vec<String>,

    /// Record the parent directory name as the asset's group
    pub group_from_parent: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            group_from_parent: true,
        }
    }
}

/// Read a JSON asset manifest (an array of raw asset records)
pub fn load_asset_manifest(path: impl AsRef<Path>) -> Result<Vec<Asset>> {
    load_manifest(path.as_ref())
}

/// Read a JSON item manifest (an array of raw item records)
pub fn load_item_manifest(path: impl AsRef<Path>) -> Result<Vec<RawItem>> {
    load_manifest(path.as_ref())
}

fn load_manifest<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let bytes = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Manifest {
        path: path.display().to_string(),
        source,
    })
}

/// Walk a directory tree and build an asset pool from the files found.
///
/// Identifier is the file name, locator the path relative to `root`, and
/// (optionally) the parent directory name becomes a group membership.
/// Results are sorted by locator so repeated scans of the same tree produce
/// the same manifest.
pub fn scan_directory(root: impl AsRef<Path>, config: &ScanConfig) -> Result<Vec<Asset>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(CatalogError::NotADirectory(root.display().to_string()));
    }

    let mut assets = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Failed to read entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            continue;
        };
        if !config.extensions.contains(&extension.to_lowercase()) {
            continue;
        }

        let Some(identifier) = path.file_name().and_then(|name| name.to_str()) else {
            log::warn!("Skipping non-UTF-8 file name under {}", root.display());
            continue;
        };
        let locator = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let mut asset = Asset::new(identifier, locator);
        if config.group_from_parent {
            let parent = path
                .parent()
                .filter(|p| *p != root)
                .and_then(|p| p.file_name())
                .and_then(|name| name.to_str());
            if let Some(group) = parent {
                asset = asset.with_group(group);
            }
        }
        assets.push(asset);
    }

    assets.sort_by(|a, b| a.locator.cmp(&b.locator));

    log::info!("Found {} assets under {}", assets.len(), root.display());
    Ok(assets)
}
