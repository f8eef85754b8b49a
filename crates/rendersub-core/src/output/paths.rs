//! Local output directories
//!
//! Downloads land in a directory tree mirroring the image file prefixes. The
//! tree is created before submitting so that prefixes with layer and pass
//! tokens resolve to existing directories.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Result;
use crate::job::RenderParams;
use crate::renderer::Renderer;
use crate::scene::{SceneInfo, DEFAULT_LAYER, MASTER_LAYER};
use crate::tokens::{TokenExpander, TokenMap};

/// Directories one job writes into
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPlan {
    /// Prefix directory per layer, tokens other than the layer left in place
    pub layer_dirs: BTreeMap<String, String>,
    /// Directories to create, in order, without duplicates
    pub directories: Vec<String>,
}

/// Work out the output directories for the selected layers
pub fn plan_local_paths(params: &RenderParams, info: &SceneInfo) -> OutputPlan {
    let expander = TokenExpander::new().leave_unmatched(true);
    let out_path = params.out_path.as_str();

    let layer_dir = |prefix: &str, layer_token: &str| {
        expander.expand(&prefix_dir(out_path, prefix), &layer_tokens(layer_token))
    };

    let mut layer_dirs = BTreeMap::new();
    layer_dirs.insert(
        DEFAULT_LAYER.to_string(),
        layer_dir(&info.file_prefix.default, MASTER_LAYER),
    );
    for (layer, prefix) in &info.file_prefix.layers {
        layer_dirs.insert(layer.clone(), layer_dir(prefix, layer));
    }

    let mut directories: Vec<String> = Vec::new();
    let mut push = |dir: String| {
        if !directories.contains(&dir) {
            directories.push(dir);
        }
    };

    for layer in &params.selected_layers {
        let dir = layer_dirs
            .get(layer)
            .cloned()
            .unwrap_or_else(|| layer_dir(&info.file_prefix.default, layer));

        let passes = info.layer_passes.get(layer).map(Vec::as_slice).unwrap_or(&[]);
        if passes.is_empty() {
            log::debug!("no passes for layer {}, creating layer directory only", layer);
            push(dir);
            continue;
        }

        for pass in passes {
            push(pass_dir(&expander, &dir, pass, params.renderer));
        }
    }

    OutputPlan {
        layer_dirs,
        directories,
    }
}

/// Plan and create the output directories
pub fn create_local_paths(params: &RenderParams, info: &SceneInfo) -> Result<OutputPlan> {
    let plan = plan_local_paths(params, info);

    for dir in &plan.directories {
        let path = PathBuf::from(dir);
        if !path.exists() {
            log::info!("creating output directory {}", path.display());
            std::fs::create_dir_all(&path)?;
        }
    }

    Ok(plan)
}

fn layer_tokens(layer: &str) -> TokenMap {
    TokenMap::new()
        .with("Layer", layer)
        .with("RenderLayer", layer)
}

/// V-Ray writes passes into a subdirectory; the others place `<RenderPass>`
/// wherever the prefix puts it
fn pass_dir(expander: &TokenExpander, layer_dir: &str, pass: &str, renderer: Renderer) -> String {
    match renderer {
        Renderer::Vray => format!("{}/{}", layer_dir.trim_end_matches('/'), pass),
        Renderer::MentalRay | Renderer::Software => {
            expander.expand(layer_dir, &TokenMap::new().with("RenderPass", pass))
        }
    }
}

/// Directory part of `prefix` resolved against `out_path`
///
/// An absolute prefix replaces `out_path`; an empty one means `out_path`.
fn prefix_dir(out_path: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return out_path.to_string();
    }

    let joined = if prefix.starts_with('/') || out_path.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", out_path.trim_end_matches('/'), prefix)
    };

    match joined.rsplit_once('/') {
        Some(("", _)) => "/".to_string(),
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    }
}
