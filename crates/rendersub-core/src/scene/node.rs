//! File references by node category
//!
//! Each category of scene node keeps its file references in different
//! attributes. The closed [`NodeCategory`] enum maps every category to one
//! extraction function, and [`NodeCategory::ALL`] is the single registration
//! table walked by [`scene_files`].

use std::collections::BTreeSet;
use std::path::Path;

use super::SceneInspector;

/// Extracts the files referenced by one node
pub type Extractor = fn(&dyn SceneInspector, &str) -> Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    File,
    CacheFile,
    DiskCache,
    VRayMesh,
    MentalrayTexture,
    GpuCache,
    MentalrayOptions,
    MentalrayIblShape,
    AlembicNode,
    VRaySettingsNode,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 10] = [
        NodeCategory::File,
        NodeCategory::CacheFile,
        NodeCategory::DiskCache,
        NodeCategory::VRayMesh,
        NodeCategory::MentalrayTexture,
        NodeCategory::GpuCache,
        NodeCategory::MentalrayOptions,
        NodeCategory::MentalrayIblShape,
        NodeCategory::AlembicNode,
        NodeCategory::VRaySettingsNode,
    ];

    /// Host node type name
    pub fn type_name(self) -> &'static str {
        match self {
            NodeCategory::File => "file",
            NodeCategory::CacheFile => "cacheFile",
            NodeCategory::DiskCache => "diskCache",
            NodeCategory::VRayMesh => "VRayMesh",
            NodeCategory::MentalrayTexture => "mentalrayTexture",
            NodeCategory::GpuCache => "gpuCache",
            NodeCategory::MentalrayOptions => "mentalrayOptions",
            NodeCategory::MentalrayIblShape => "mentalrayIblShape",
            NodeCategory::AlembicNode => "AlembicNode",
            NodeCategory::VRaySettingsNode => "VRaySettingsNode",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.type_name() == name)
    }

    pub fn extractor(self) -> Extractor {
        match self {
            NodeCategory::File | NodeCategory::MentalrayTexture => texture_file,
            NodeCategory::CacheFile => cache_file,
            NodeCategory::DiskCache => disk_cache,
            NodeCategory::VRayMesh => vray_mesh,
            NodeCategory::GpuCache => gpu_cache,
            NodeCategory::MentalrayOptions => final_gather_map,
            NodeCategory::MentalrayIblShape => ibl_texture,
            NodeCategory::AlembicNode => alembic_file,
            NodeCategory::VRaySettingsNode => irradiance_map,
        }
    }

    /// Files referenced by `node`, as stored in the scene
    pub fn files(self, scene: &dyn SceneInspector, node: &str) -> Vec<String> {
        (self.extractor())(scene, node)
    }
}

fn single(scene: &dyn SceneInspector, node: &str, attribute: &str) -> Vec<String> {
    scene.attribute(node, attribute).into_iter().collect()
}

fn texture_file(scene: &dyn SceneInspector, node: &str) -> Vec<String> {
    single(scene, node, "fileTextureName")
}

fn cache_file(scene: &dyn SceneInspector, node: &str) -> Vec<String> {
    let (Some(path), Some(name)) = (
        scene.attribute(node, "cachePath"),
        scene.attribute(node, "cacheName"),
    ) else {
        return Vec::new();
    };

    let dir = Path::new(&path);
    ["mc", "xml"]
        .iter()
        .map(|ext| {
            dir.join(format!("{}.{}", name, ext))
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

fn disk_cache(scene: &dyn SceneInspector, node: &str) -> Vec<String> {
    single(scene, node, "cacheName")
}

fn vray_mesh(scene: &dyn SceneInspector, node: &str) -> Vec<String> {
    single(scene, node, "fileName")
}

fn gpu_cache(scene: &dyn SceneInspector, node: &str) -> Vec<String> {
    single(scene, node, "cacheFileName")
}

fn final_gather_map(scene: &dyn SceneInspector, node: &str) -> Vec<String> {
    let Some(map_name) = scene.attribute(node, "finalGatherFilename") else {
        return Vec::new();
    };
    let map_name = map_name.trim();
    if map_name.is_empty() {
        return Vec::new();
    }

    let mut path = scene
        .project_dir()
        .join("renderData/mentalray/finalgMap")
        .join(map_name)
        .to_string_lossy()
        .into_owned();
    if !path.ends_with(".fgmap") {
        path.push_str(".fgmap");
    }
    vec![path]
}

fn ibl_texture(scene: &dyn SceneInspector, node: &str) -> Vec<String> {
    single(scene, node, "texture")
}

fn alembic_file(scene: &dyn SceneInspector, node: &str) -> Vec<String> {
    single(scene, node, "abc_File")
}

fn irradiance_map(scene: &dyn SceneInspector, node: &str) -> Vec<String> {
    single(scene, node, "ifile")
}

/// Every file the scene depends on, with forward slashes, deduplicated and sorted
pub fn scene_files(scene: &dyn SceneInspector) -> Vec<String> {
    let mut files = BTreeSet::new();

    for category in NodeCategory::ALL {
        let nodes = scene.nodes(category.type_name());
        log::debug!("{} {} node(s)", nodes.len(), category.type_name());

        for node in nodes {
            for file in category.files(scene, &node) {
                if !file.is_empty() {
                    files.insert(file.replace('\\', "/"));
                }
            }
        }
    }

    files.into_iter().collect()
}
