//! Shared setup for commands that work on a scene

use anyhow::Result;
use rendersub_core::config::Config;
use rendersub_core::job::{FormDefaults, SubmitForm};
use rendersub_core::scene::SceneSnapshot;
use rendersub_core::submit::SpoolClient;
use std::path::Path;

/// Config, scene and service client for one command
pub struct Context {
    pub config: Config,
    pub scene: SceneSnapshot,
    pub client: SpoolClient,
}

impl Context {
    /// Load the config and the scene snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be found, parsed or validated,
    /// or if the scene snapshot cannot be read.
    pub fn new(config: Option<&Path>, scene: &Path) -> Result<Self> {
        let config_path = Config::locate(config);
        log::debug!("using config {}", config_path.display());
        let config = Config::from_file(&config_path)?;

        let scene = SceneSnapshot::from_file(scene)?;
        let client = SpoolClient::from_config(&config);

        Ok(Self {
            config,
            scene,
            client,
        })
    }

    /// Submit form initialised from the scene, with `assignments` applied in order
    pub fn form(&self, assignments: &[String]) -> Result<SubmitForm> {
        let defaults = FormDefaults::gather(&self.scene, &self.config, &self.client)?;
        let mut form = SubmitForm::new(defaults);

        for assignment in assignments {
            form.assign(assignment)?;
        }

        Ok(form)
    }
}
