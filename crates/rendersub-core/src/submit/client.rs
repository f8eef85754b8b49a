use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::PathMapping;
use crate::error::Result;
use crate::job::RenderParams;

/// Plugin name jobs from this tool are submitted under
pub const PLUGIN_NAME: &str = "maya";

/// Service login
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both username and password are non-empty
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// A job ready to hand to the service
#[derive(Debug, Clone, Serialize)]
pub struct JobRequest {
    pub plugin: String,
    pub scene_path: PathBuf,
    /// Comma-joined layer names; `None` for upload-only jobs
    pub layers: Option<String>,
    pub params: RenderParams,
}

impl JobRequest {
    pub fn new(scene_path: impl Into<PathBuf>, layers: &[String], params: RenderParams) -> Self {
        let layers = (!layers.is_empty()).then(|| layers.join(","));
        Self {
            plugin: PLUGIN_NAME.to_string(),
            scene_path: scene_path.into(),
            layers,
            params,
        }
    }
}

/// Acknowledgement returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub job_id: String,
    /// Where the job landed, when the client has a local record of it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
}

/// Remote render service
///
/// Lookups take the saved scene path; the stateful calls follow the order
/// `authenticate`, `add_path_mappings`, `submit_job`.
pub trait SubmissionClient {
    /// Service-side project the scene belongs to
    fn project_name(&self, scene_path: &Path) -> Result<String>;

    /// Default output directory for renders of the scene
    fn output_path(&self, scene_path: &Path) -> Result<String>;

    fn authenticate(&mut self, credentials: &Credentials) -> Result<()>;

    fn add_path_mappings(&mut self, mappings: &[PathMapping]) -> Result<()>;

    fn submit_job(&mut self, request: &JobRequest) -> Result<SubmitReceipt>;
}
