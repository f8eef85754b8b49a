//! File-backed submission client
//!
//! Jobs are written as JSON descriptors into a spool directory, one file per
//! job, where an uploader (or a test) picks them up.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use super::client::{Credentials, JobRequest, SubmissionClient, SubmitReceipt};
use crate::config::{ApiConfig, Config, PathMapping};
use crate::error::{RendersubError, Result};
use crate::job::RenderParams;

/// Conventional scene directory inside a host project
const SCENES_DIR: &str = "scenes";

/// Conventional image directory inside a host project
const IMAGES_DIR: &str = "images";

#[derive(Debug, Clone)]
pub struct SpoolClient {
    api: ApiConfig,
    spool_dir: PathBuf,
    username: Option<String>,
    path_mappings: Vec<PathMapping>,
}

/// On-disk job descriptor
#[derive(Debug, Serialize)]
struct SpooledJob<'a> {
    job_id: &'a str,
    submitted_at: DateTime<Utc>,
    site: &'a str,
    username: &'a str,
    plugin: &'a str,
    scene_path: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    layers: Option<&'a str>,
    path_mappings: &'a [PathMapping],
    params: &'a RenderParams,
}

impl SpoolClient {
    pub fn new(api: ApiConfig, spool_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            spool_dir: spool_dir.into(),
            username: None,
            path_mappings: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api.clone(), config.submit.spool_dir.clone())
    }
}

/// Project root for a scene saved under `<project>/scenes/`
fn project_root(scene_path: &Path) -> Option<&Path> {
    let dir = scene_path.parent()?;
    if dir.file_name().is_some_and(|name| name == SCENES_DIR) {
        dir.parent()
    } else {
        Some(dir)
    }
}

impl SubmissionClient for SpoolClient {
    fn project_name(&self, scene_path: &Path) -> Result<String> {
        let name = if scene_path.parent().and_then(Path::file_name).is_some_and(|n| n == SCENES_DIR) {
            project_root(scene_path).and_then(Path::file_name)
        } else {
            scene_path.file_stem()
        };

        name.map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                RendersubError::ServiceError(format!(
                    "cannot derive a project name from {}",
                    scene_path.display()
                ))
            })
    }

    fn output_path(&self, scene_path: &Path) -> Result<String> {
        let root = project_root(scene_path).ok_or_else(|| {
            RendersubError::ServiceError(format!(
                "cannot derive an output path from {}",
                scene_path.display()
            ))
        })?;
        Ok(root.join(IMAGES_DIR).to_string_lossy().into_owned())
    }

    fn authenticate(&mut self, credentials: &Credentials) -> Result<()> {
        if self.api.key.trim().is_empty() {
            return Err(RendersubError::AuthenticationFailed(
                "no API key configured".to_string(),
            ));
        }
        if !credentials.is_complete() {
            return Err(RendersubError::AuthenticationFailed(
                "username and password are required".to_string(),
            ));
        }

        log::info!("authenticated as {} on {}", credentials.username, self.api.site);
        self.username = Some(credentials.username.clone());
        Ok(())
    }

    fn add_path_mappings(&mut self, mappings: &[PathMapping]) -> Result<()> {
        for mapping in mappings {
            log::debug!("path mapping {} -> {}", mapping.from, mapping.to);
            if !self.path_mappings.contains(mapping) {
                self.path_mappings.push(mapping.clone());
            }
        }
        Ok(())
    }

    fn submit_job(&mut self, request: &JobRequest) -> Result<SubmitReceipt> {
        let username = self.username.as_deref().ok_or_else(|| {
            RendersubError::AuthenticationFailed("not authenticated".to_string())
        })?;

        let submitted_at = Utc::now();
        let job_id = job_id(&request.scene_path, submitted_at);

        let job = SpooledJob {
            job_id: &job_id,
            submitted_at,
            site: &self.api.site,
            username,
            plugin: &request.plugin,
            scene_path: &request.scene_path,
            layers: request.layers.as_deref(),
            path_mappings: &self.path_mappings,
            params: &request.params,
        };
        let content = serde_json::to_string_pretty(&job)?;

        std::fs::create_dir_all(&self.spool_dir).map_err(|e| {
            RendersubError::SpoolWriteError(format!("Failed to create spool dir: {}", e))
        })?;
        let path = self.spool_dir.join(format!("{}.json", job_id));
        atomic_write_json(&content, &path, &self.spool_dir)?;

        log::info!("spooled job {} to {}", job_id, path.display());
        Ok(SubmitReceipt {
            job_id,
            location: Some(path),
        })
    }
}

/// `<YYYYmmddHHMMSS>-<8 hex>`, the hash covering the scene path and nanoseconds
fn job_id(scene_path: &Path, at: DateTime<Utc>) -> String {
    let seed = format!(
        "{}@{}",
        scene_path.display(),
        at.timestamp_nanos_opt().unwrap_or_default()
    );
    let digest = hex::encode(Sha256::digest(seed.as_bytes()));
    format!("{}-{}", at.format("%Y%m%d%H%M%S"), &digest[..8])
}

/// Write JSON atomically using NamedTempFile + persist
fn atomic_write_json(content: &str, path: &Path, parent: &Path) -> Result<()> {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        RendersubError::SpoolWriteError(format!("Failed to create temp file: {}", e))
    })?;

    temp_file.write_all(content.as_bytes()).map_err(|e| {
        RendersubError::SpoolWriteError(format!("Failed to write temp file: {}", e))
    })?;

    temp_file.as_file().sync_all().map_err(|e| {
        RendersubError::SpoolWriteError(format!("Failed to sync temp file: {}", e))
    })?;

    temp_file.persist(path).map_err(|e| {
        RendersubError::SpoolWriteError(format!("Failed to persist temp file: {}", e))
    })?;

    Ok(())
}
