//! JSON-backed scene inspector
//!
//! A `SceneSnapshot` is a static export of everything [`SceneInspector`]
//! can ask about. Attribute values may be written as JSON strings, numbers or
//! booleans; they are read back as strings.
//!
//! ```json
//! {
//!   "scene_path": "/proj/scenes/shot010.ma",
//!   "project_dir": "/proj",
//!   "frame_range": {"start": 1001, "end": 1100},
//!   "resolution": {"width": 1920, "height": 1080},
//!   "layers": [{"name": "beauty", "overrides": {"vraySettings.fileNamePrefix": "<Layer>/shot"}}],
//!   "cameras": [{"name": "shotCam", "renderable": true}],
//!   "nodes": {"tex1": {"type": "file", "attributes": {"fileTextureName": "/tex/wood.png"}}},
//!   "image_formats": {"software": "Maya IFF (iff)"}
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::SceneInspector;
use crate::error::{RendersubError, Result};
use crate::job::FrameRange;
use crate::renderer::Renderer;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default)]
    pub scene_path: Option<PathBuf>,
    pub project_dir: PathBuf,
    #[serde(default)]
    pub frame_range: FrameRange,
    #[serde(default = "default_frame_step")]
    pub frame_step: u32,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub layers: Vec<LayerRecord>,
    #[serde(default)]
    pub cameras: Vec<CameraRecord>,
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeRecord>,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub image_formats: BTreeMap<Renderer, String>,
}

fn default_frame_step() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerRecord {
    pub name: String,
    /// Layer overrides keyed by `node.attribute`
    #[serde(default)]
    pub overrides: BTreeMap<String, Value>,
    /// Render pass nodes connected to this layer
    #[serde(default)]
    pub render_passes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRecord {
    pub name: String,
    #[serde(default)]
    pub renderable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl SceneSnapshot {
    /// Load a snapshot from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let parse_error = |reason: String| RendersubError::SceneParseError {
            path: path.to_path_buf(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
        let snapshot: Self = serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;

        log::debug!(
            "loaded scene snapshot {} ({} nodes, {} layers)",
            path.display(),
            snapshot.nodes.len(),
            snapshot.layers.len()
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| RendersubError::SceneParseError {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })
    }

    fn layer(&self, name: &str) -> Option<&LayerRecord> {
        self.layers.iter().find(|l| l.name == name)
    }
}

/// Attribute value as text; `null` reads as unset
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl SceneInspector for SceneSnapshot {
    fn scene_path(&self) -> Option<PathBuf> {
        self.scene_path.clone()
    }

    fn project_dir(&self) -> PathBuf {
        self.project_dir.clone()
    }

    fn frame_range(&self) -> FrameRange {
        self.frame_range
    }

    fn frame_step(&self) -> u32 {
        self.frame_step
    }

    fn resolution(&self) -> (u32, u32) {
        (self.resolution.width, self.resolution.height)
    }

    fn render_layers(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.name.clone()).collect()
    }

    fn renderable_cameras(&self) -> Vec<String> {
        self.cameras
            .iter()
            .filter(|c| c.renderable)
            .map(|c| c.name.clone())
            .collect()
    }

    fn nodes(&self, type_name: &str) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.node_type == type_name)
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn attribute(&self, node: &str, attribute: &str) -> Option<String> {
        self.nodes
            .get(node)
            .and_then(|n| n.attributes.get(attribute))
            .and_then(value_to_string)
    }

    fn attribute_names(&self, node: &str) -> Vec<String> {
        self.nodes
            .get(node)
            .map(|n| n.attributes.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn layer_attribute(&self, layer: &str, node: &str, attribute: &str) -> Option<String> {
        let key = format!("{}.{}", node, attribute);
        match self.layer(layer).and_then(|l| l.overrides.get(&key)) {
            Some(value) => value_to_string(value),
            None => self.attribute(node, attribute),
        }
    }

    fn render_pass_connections(&self, layer: &str) -> Vec<String> {
        self.layer(layer)
            .map(|l| l.render_passes.clone())
            .unwrap_or_default()
    }

    fn plugins_in_use(&self) -> Vec<String> {
        self.plugins.clone()
    }

    fn references(&self) -> Vec<String> {
        self.references.clone()
    }

    fn image_format_label(&self, renderer: Renderer) -> Option<String> {
        self.image_formats.get(&renderer).cloned()
    }
}
