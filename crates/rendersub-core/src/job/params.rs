use serde::{Serialize, Serializer};

use crate::renderer::Renderer;
use crate::scene::SceneInfo;

/// Job parameters sent to the render service
///
/// Flags go over the wire as `0`/`1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderParams {
    pub proj_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(serialize_with = "flag")]
    pub upload_only: bool,
    #[serde(serialize_with = "flag")]
    pub start_new_slots: bool,
    #[serde(serialize_with = "flag")]
    pub skip_check: bool,
    #[serde(serialize_with = "flag")]
    pub notify_complete: bool,
    pub project: String,
    pub out_path: String,
    pub renderer: Renderer,
    pub num_instances: u32,
    /// Service-side instance label
    pub instance_type: String,
    pub frange: String,
    pub step: u32,
    pub chunk_size: u32,
    pub camera: String,
    pub xres: u32,
    pub yres: u32,
    #[serde(serialize_with = "flag")]
    pub vray_nightly: bool,
    #[serde(serialize_with = "flag")]
    pub use_vrscene: bool,
    /// Absent for upload-only jobs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_info: Option<SceneInfo>,
    /// Layers chosen in the form; sent separately from the params
    #[serde(skip)]
    pub selected_layers: Vec<String>,
}

fn flag<S: Serializer>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}
