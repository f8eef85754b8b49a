//! Render pass discovery per layer

use super::{is_truthy, SceneInspector};
use crate::renderer::Renderer;

/// Host type of V-Ray render element nodes
const VRAY_ELEMENT_TYPE: &str = "VRayRenderElement";

/// Pass every mental ray layer renders
const MASTER_BEAUTY: &str = "MasterBeauty";

/// Render passes `layer` produces with `renderer`
///
/// - V-Ray: every render element enabled on the layer, named by its first
///   `vray_name_*` or `vray_filename_*` attribute
/// - mental ray: `MasterBeauty`, then each renderable pass connected to the layer
/// - Software: none
pub fn pass_names(scene: &dyn SceneInspector, renderer: Renderer, layer: &str) -> Vec<String> {
    match renderer {
        Renderer::Vray => vray_elements(scene, layer),
        Renderer::MentalRay => mental_ray_passes(scene, layer),
        Renderer::Software => Vec::new(),
    }
}

fn vray_elements(scene: &dyn SceneInspector, layer: &str) -> Vec<String> {
    let mut names = Vec::new();

    for element in scene.nodes(VRAY_ELEMENT_TYPE) {
        if !is_truthy(scene.layer_attribute(layer, &element, "enabled").as_deref()) {
            continue;
        }

        let name_attr = scene
            .attribute_names(&element)
            .into_iter()
            .find(|attr| attr.starts_with("vray_name_") || attr.starts_with("vray_filename_"));

        match name_attr.and_then(|attr| scene.layer_attribute(layer, &element, &attr)) {
            Some(name) => names.push(name),
            None => log::warn!("render element '{}' has no name attribute, skipped", element),
        }
    }

    names
}

fn mental_ray_passes(scene: &dyn SceneInspector, layer: &str) -> Vec<String> {
    let mut names = vec![MASTER_BEAUTY.to_string()];

    for pass in scene.render_pass_connections(layer) {
        log::debug!("pass {} for {}", pass, layer);
        if is_truthy(scene.layer_attribute(layer, &pass, "renderable").as_deref()) {
            names.push(pass);
        }
    }

    names
}
