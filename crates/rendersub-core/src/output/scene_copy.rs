//! Uniquely named scene copies
//!
//! Submitting a copy keeps later edits to the working scene out of a
//! running job. Copies go to `cloud_submit/` next to the scene.

use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Directory, next to the scene, that holds submitted copies
pub const CLOUD_SUBMIT_DIR: &str = "cloud_submit";

/// Extension of saved copies
const SCENE_EXTENSION: &str = "ma";

/// `<scene_dir>/cloud_submit/<stem>[_<extra>]_<hash6>.ma`
///
/// `hash6` is the last six hex digits of the SHA-256 of
/// `<stem>[_<extra>]_<MMDDYYYYHHMMSS>`, so copies made in different seconds
/// get different names.
pub fn unique_scene_path(scene_path: &Path, extra: Option<&str>, now: NaiveDateTime) -> PathBuf {
    let scene_dir = scene_path.parent().unwrap_or_else(|| Path::new(""));

    let mut name = scene_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Some(extra) = extra.filter(|e| !e.is_empty()) {
        name = format!("{}_{}", name, extra);
    }

    let timecode = now.format("%m%d%Y%H%M%S");
    let digest = hex::encode(Sha256::digest(format!("{}_{}", name, timecode).as_bytes()));
    let hash = &digest[digest.len() - 6..];

    scene_dir
        .join(CLOUD_SUBMIT_DIR)
        .join(format!("{}_{}.{}", name, hash, SCENE_EXTENSION))
}

/// Copy the scene file to a fresh [`unique_scene_path`]
pub fn save_scene_copy(scene_path: &Path, extra: Option<&str>, now: NaiveDateTime) -> Result<PathBuf> {
    let target = unique_scene_path(scene_path, extra, now);
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir)?;
    }

    std::fs::copy(scene_path, &target)?;
    log::info!("saved scene copy {}", target.display());
    Ok(target)
}
