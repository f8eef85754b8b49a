//! Scene introspection
//!
//! The host application is reached only through [`SceneInspector`]. Everything
//! the submitter needs from the open scene goes through it: layers, cameras,
//! node attributes, and render-layer overrides. [`SceneSnapshot`] implements
//! it from a JSON export so the pipeline runs outside the host.

pub mod info;
pub mod node;
pub mod passes;
pub mod snapshot;

pub use info::{FilePrefix, SceneInfo};
pub use node::{scene_files, NodeCategory};
pub use passes::pass_names;
pub use snapshot::SceneSnapshot;

use crate::job::FrameRange;
use crate::renderer::Renderer;
use std::path::PathBuf;

/// Layer that always exists and cannot be deleted
pub const DEFAULT_LAYER: &str = "defaultRenderLayer";

/// Name the default layer takes in output paths
pub const MASTER_LAYER: &str = "masterLayer";

/// Read-only view of the scene open in the host application
pub trait SceneInspector {
    /// Path of the open scene, `None` if it has never been saved
    fn scene_path(&self) -> Option<PathBuf>;

    /// Project (workspace) root directory
    fn project_dir(&self) -> PathBuf;

    fn frame_range(&self) -> FrameRange;

    fn frame_step(&self) -> u32;

    /// Output resolution as (width, height)
    fn resolution(&self) -> (u32, u32);

    /// Every render layer, including namespaced ones and [`DEFAULT_LAYER`]
    fn render_layers(&self) -> Vec<String>;

    fn renderable_cameras(&self) -> Vec<String>;

    /// Names of nodes whose host type is `type_name`
    fn nodes(&self, type_name: &str) -> Vec<String>;

    fn attribute(&self, node: &str, attribute: &str) -> Option<String>;

    fn attribute_names(&self, node: &str) -> Vec<String>;

    /// Attribute value while `layer` is the active render layer
    fn layer_attribute(&self, layer: &str, node: &str, attribute: &str) -> Option<String> {
        let _ = layer;
        self.attribute(node, attribute)
    }

    /// Render pass nodes connected to `layer`
    fn render_pass_connections(&self, layer: &str) -> Vec<String>;

    /// Names of host plugins the scene uses
    fn plugins_in_use(&self) -> Vec<String>;

    /// Referenced scene files
    fn references(&self) -> Vec<String>;

    /// Image format menu label for `renderer`, e.g. `Maya IFF (iff)`
    ///
    /// `None` when the render globals have not been opened yet.
    fn image_format_label(&self, renderer: Renderer) -> Option<String>;
}

/// Render layers outside any namespace, default layer included
pub fn top_level_layers(scene: &dyn SceneInspector) -> Vec<String> {
    scene
        .render_layers()
        .into_iter()
        .filter(|layer| !layer.contains(':'))
        .collect()
}

/// Interpret an attribute value as a boolean
pub(crate) fn is_truthy(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some(v) => {
            v == "1" || v.eq_ignore_ascii_case("true") || v.parse::<f64>().is_ok_and(|n| n != 0.0)
        }
        None => false,
    }
}
