// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image discovery

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Recursively collect image files under `dir`, sorted by path.
///
/// A file is kept when its extension matches one of `extensions`, ignoring
/// case. A missing directory yields an empty list, and entries that cannot
/// be read are logged and skipped.
pub fn discover_images(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Images directory not found: {}", dir.display());
        return Vec::new();
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)));

        if matches {
            images.push(entry.into_path());
        }
    }

    images.sort();
    debug!("Found {} images under {}", images.len(), dir.display());

    images
}
