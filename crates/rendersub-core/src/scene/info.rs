//! Scene summary sent along with a job
//!
//! Lets the service skip its own file checks: the files, layers and output
//! naming are gathered here, on the submitting side.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::{pass_names, scene_files, top_level_layers, SceneInspector, DEFAULT_LAYER};
use crate::error::{RendersubError, Result};
use crate::renderer::Renderer;

/// Image file prefixes: the default layer's, then per-layer overrides
///
/// Serialized as a two-element array `[default, {layer: prefix}]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePrefix {
    pub default: String,
    pub layers: BTreeMap<String, String>,
}

impl Serialize for FilePrefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.default, &self.layers).serialize(serializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SceneInfo {
    pub files: Vec<String>,
    pub render_layers: Vec<String>,
    pub references: Vec<String>,
    pub file_prefix: FilePrefix,
    pub padding: u32,
    pub extension: String,
    pub plugins: Vec<String>,
    /// Passes per layer, used locally for output directories only
    #[serde(skip)]
    pub layer_passes: BTreeMap<String, Vec<String>>,
}

impl SceneInfo {
    /// Gather scene info for a job rendered with `renderer`
    pub fn collect(scene: &dyn SceneInspector, renderer: Renderer) -> Result<Self> {
        let render_layers = top_level_layers(scene);
        let (prefix_node, prefix_attr) = renderer.prefix_attribute();

        let mut layer_prefixes = BTreeMap::new();
        let mut layer_passes = BTreeMap::new();
        for layer in render_layers.iter().filter(|l| l.as_str() != DEFAULT_LAYER) {
            if let Some(prefix) = scene.layer_attribute(layer, prefix_node, prefix_attr) {
                layer_prefixes.insert(layer.clone(), prefix);
            }

            if renderer != Renderer::Software {
                layer_passes.insert(layer.clone(), pass_names(scene, renderer, layer));
            }
        }

        let default_prefix = scene
            .layer_attribute(DEFAULT_LAYER, prefix_node, prefix_attr)
            .unwrap_or_default();

        let mut plugins = scene.plugins_in_use();
        if !scene.nodes("cacheFile").is_empty() {
            plugins.push("cache".to_string());
        }

        let info = Self {
            files: scene_files(scene),
            render_layers,
            references: scene.references(),
            file_prefix: FilePrefix {
                default: default_prefix,
                layers: layer_prefixes,
            },
            padding: padding(scene, renderer)?,
            extension: extension(scene, renderer)?,
            plugins,
            layer_passes,
        };

        log::info!(
            "scene info: {} file(s), {} layer(s), extension '{}'",
            info.files.len(),
            info.render_layers.len(),
            info.extension
        );
        Ok(info)
    }
}

fn padding(scene: &dyn SceneInspector, renderer: Renderer) -> Result<u32> {
    let (node, attr) = renderer.padding_attribute();
    let raw = scene.attribute(node, attr).ok_or_else(|| {
        RendersubError::SceneQueryFailed(format!("{}.{} is not set", node, attr))
    })?;

    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| *n >= 0.0)
        .map(|n| n as u32)
        .ok_or_else(|| {
            RendersubError::SceneQueryFailed(format!("{}.{} is not a number: '{}'", node, attr, raw))
        })
}

/// Image extension, at most three characters
fn extension(scene: &dyn SceneInspector, renderer: Renderer) -> Result<String> {
    let full = match renderer {
        Renderer::Vray => scene
            .attribute("vraySettings", "imageFormatStr")
            .unwrap_or_else(|| "png".to_string()),
        Renderer::MentalRay | Renderer::Software => scene
            .image_format_label(renderer)
            .as_deref()
            .and_then(extension_from_label)
            .ok_or_else(|| RendersubError::RenderGlobalsUnavailable {
                renderer: renderer.label().to_string(),
            })?,
    };

    Ok(full.chars().take(3).collect())
}

/// `Maya IFF (iff)` -> `iff`
fn extension_from_label(label: &str) -> Option<String> {
    let last = label.split_whitespace().last()?;
    let ext = last.strip_prefix('(')?.strip_suffix(')')?;
    (!ext.is_empty()).then(|| ext.to_string())
}
