//! Files written on the submitting machine

pub mod paths;
pub mod scene_copy;

pub use paths::{create_local_paths, plan_local_paths, OutputPlan};
pub use scene_copy::{save_scene_copy, unique_scene_path, CLOUD_SUBMIT_DIR};
