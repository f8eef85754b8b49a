use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::consts;
use crate::error::{RendersubError, Result};
use crate::renderer::Renderer;

/// rendersub.toml schema
///
/// Loading always validates: a `Config` value in hand has every required
/// field set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub submit: SubmitConfig,
    #[serde(default)]
    pub instance_types: Vec<InstanceType>,
    #[serde(default)]
    pub path_mappings: Vec<PathMapping>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Render service site URL
    #[serde(default)]
    pub site: String,
    /// API key issued for this plugin
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    #[serde(default = "default_num_instances")]
    pub num_instances: u32,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,
    #[serde(default = "default_renderer")]
    pub default_renderer: Renderer,
    #[serde(default)]
    pub default_instance_type: Option<String>,
    #[serde(default = "default_spool_dir")]
    pub spool_dir: PathBuf,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            num_instances: consts::submit::NUM_INSTANCES,
            chunk_size: consts::submit::CHUNK_SIZE,
            default_renderer: Renderer::Vray,
            default_instance_type: None,
            spool_dir: PathBuf::from(consts::submit::SPOOL_DIR),
        }
    }
}

fn default_num_instances() -> u32 {
    consts::submit::NUM_INSTANCES
}

fn default_chunk_size() -> u32 {
    consts::submit::CHUNK_SIZE
}

fn default_renderer() -> Renderer {
    Renderer::Vray
}

fn default_spool_dir() -> PathBuf {
    PathBuf::from(consts::submit::SPOOL_DIR)
}

/// Machine type offered by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceType {
    /// Name shown in the form
    pub name: String,
    /// Identifier sent to the service
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl InstanceType {
    /// Menu entry, e.g. `standard (8 core, 30GB RAM)`
    pub fn menu_label(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.description)
        }
    }
}

/// Path prefix replacement applied by the service when resolving scene files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMapping {
    pub from: String,
    pub to: String,
}

impl Config {
    /// Read, parse and validate rendersub.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RendersubError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                RendersubError::ConfigParseError(e.to_string())
            }
        })?;

        let config = Self::parse(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| RendersubError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write rendersub.toml
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RendersubError::ConfigParseError(e.to_string()))?;

        std::fs::write(path.as_ref(), content).map_err(RendersubError::IoError)?;

        Ok(())
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        require("api.site", &self.api.site)?;
        require("api.key", &self.api.key)?;

        if self.submit.num_instances == 0 {
            return Err(invalid("submit.num_instances", "must be at least 1"));
        }
        if self.submit.chunk_size == 0 {
            return Err(invalid("submit.chunk_size", "must be at least 1"));
        }

        for (i, instance) in self.instance_types.iter().enumerate() {
            require(&format!("instance_types[{}].name", i), &instance.name)?;
            require(&format!("instance_types[{}].label", i), &instance.label)?;
        }

        if let Some(name) = &self.submit.default_instance_type {
            if !self.instance_types().iter().any(|t| &t.name == name) {
                return Err(invalid(
                    "submit.default_instance_type",
                    &format!("unknown instance type '{}'", name),
                ));
            }
        }

        for (i, mapping) in self.path_mappings.iter().enumerate() {
            require(&format!("path_mappings[{}].from", i), &mapping.from)?;
        }

        Ok(())
    }

    /// Configured instance types, or the built-in list when none are set
    pub fn instance_types(&self) -> Vec<InstanceType> {
        if !self.instance_types.is_empty() {
            return self.instance_types.clone();
        }

        consts::INSTANCE_TYPES
            .iter()
            .map(|(name, label, description)| InstanceType {
                name: name.to_string(),
                label: label.to_string(),
                description: description.to_string(),
            })
            .collect()
    }

    /// Instance type preselected in the form
    pub fn default_instance_type(&self) -> InstanceType {
        let types = self.instance_types();
        let wanted = self.submit.default_instance_type.as_deref();
        types
            .iter()
            .find(|t| Some(t.name.as_str()) == wanted)
            .or_else(|| types.first())
            .cloned()
            .unwrap_or_else(|| InstanceType {
                name: consts::INSTANCE_TYPES[0].0.to_string(),
                label: consts::INSTANCE_TYPES[0].1.to_string(),
                description: consts::INSTANCE_TYPES[0].2.to_string(),
            })
    }

    /// Resolve which config file to load
    ///
    /// Order: explicit path, `./rendersub.toml`, then the per-user config
    /// directory. Falls back to `./rendersub.toml` so the not-found error
    /// names the most likely location. `RENDERSUB_CONFIG` is read by the CLI
    /// and arrives here as the explicit path.
    pub fn locate(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let local = PathBuf::from(consts::CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }

        if let Some(user) = dirs::config_dir()
            .map(|dir| dir.join("rendersub").join(consts::CONFIG_FILE_NAME))
            .filter(|path| path.exists())
        {
            return user;
        }

        local
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "required value is missing"));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> RendersubError {
    RendersubError::ConfigInvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
