//! Sample project fixtures
//!
//! A fixture project is a directory laid out like a host project:
//!
//! ```text
//! <root>/rendersub.toml
//! <root>/scenes/shot010.ma      scene file (placeholder content)
//! <root>/scenes/shot010.json    scene snapshot
//! <root>/spool/                 spool directory from the config
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Replaced by the project root when a fixture is written
pub const ROOT_PLACEHOLDER: &str = "@ROOT@";

/// Scene snapshot with three top-level layers, one namespaced layer and
/// files for several node categories
pub const SAMPLE_SCENE_JSON: &str = r#"{
  "scene_path": "@ROOT@/scenes/shot010.ma",
  "project_dir": "@ROOT@/",
  "frame_range": {"start": 1001, "end": 1024},
  "frame_step": 1,
  "resolution": {"width": 2048, "height": 858},
  "layers": [
    {"name": "defaultRenderLayer"},
    {"name": "beauty", "render_passes": ["diffuse", "specular"],
     "overrides": {"defaultRenderGlobals.imageFilePrefix": "renders/<RenderLayer>/<RenderPass>/shot"}},
    {"name": "fg", "render_passes": ["diffuse"],
     "overrides": {"diffuse.renderable": false}},
    {"name": "ref:bg"}
  ],
  "cameras": [{"name": "persp"}, {"name": "shotCam", "renderable": true}],
  "nodes": {
    "defaultRenderGlobals": {"type": "renderGlobals",
      "attributes": {"imageFilePrefix": "renders/<RenderLayer>/shot", "extensionPadding": 4}},
    "vraySettings": {"type": "VRaySettingsNode",
      "attributes": {"fileNamePrefix": "vray/<Layer>/shot", "fileNamePadding": 4,
                     "imageFormatStr": "exr", "ifile": "@ROOT@/data/gi.vrmap"}},
    "diffuse": {"type": "renderPass", "attributes": {"renderable": true}},
    "specular": {"type": "renderPass", "attributes": {"renderable": true}},
    "woodTex": {"type": "file", "attributes": {"fileTextureName": "@ROOT@/sourceimages/wood.png"}},
    "clothCache": {"type": "cacheFile",
      "attributes": {"cachePath": "@ROOT@/cache", "cacheName": "cloth"}},
    "lightingElem": {"type": "VRayRenderElement",
      "attributes": {"enabled": true, "vray_name_lighting": "lighting"}}
  },
  "plugins": ["Mayatomr", "vrayformaya"],
  "references": ["@ROOT@/assets/char.ma"],
  "image_formats": {"mentalray": "OpenEXR (exr)", "software": "Maya IFF (iff)"}
}
"#;

/// Minimal valid config with a spool directory inside the project
pub const SAMPLE_CONFIG_TOML: &str = r#"[api]
site = "https://studio.render.example"
key = "test-key"

[submit]
chunk_size = 8
spool_dir = "@ROOT@/spool"

[[path_mappings]]
from = "/mnt/projects"
to = "/projects"
"#;

/// Sample project written into a temporary directory
pub struct FixtureProject {
    // dropped last, removing the whole tree
    _temp: TempDir,
    pub root: PathBuf,
}

impl FixtureProject {
    /// Write the sample project into a fresh temporary directory
    pub fn new() -> Self {
        let temp = crate::temp_dir_in_workspace();
        let root = temp.path().to_path_buf();

        write_fixture(&root, "rendersub.toml", SAMPLE_CONFIG_TOML);
        write_fixture(&root, "scenes/shot010.json", SAMPLE_SCENE_JSON);
        write_fixture(&root, "scenes/shot010.ma", "//Maya ASCII 2014 scene\n");

        Self { _temp: temp, root }
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("rendersub.toml")
    }

    /// Scene snapshot JSON
    pub fn scene_path(&self) -> PathBuf {
        self.root.join("scenes").join("shot010.json")
    }

    /// Scene file the snapshot describes
    pub fn scene_file(&self) -> PathBuf {
        self.root.join("scenes").join("shot010.ma")
    }

    pub fn spool_dir(&self) -> PathBuf {
        self.root.join("spool")
    }

    /// Default output directory for the sample scene
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// Overwrite a file relative to the project root
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        write_fixture(&self.root, relative, content)
    }
}

impl Default for FixtureProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `content` under `root`, substituting [`ROOT_PLACEHOLDER`]
pub fn write_fixture(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }

    let content = content.replace(ROOT_PLACEHOLDER, &root.to_string_lossy());
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}
