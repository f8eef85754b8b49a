//! Files command - list the files a scene depends on

use crate::output::{print_json, print_text};
use anyhow::Result;
use rendersub_core::scene::{SceneSnapshot, scene_files};
use std::path::Path;

pub fn run(scene: &Path, json: bool) -> Result<()> {
    let scene = SceneSnapshot::from_file(scene)?;
    let files = scene_files(&scene);

    if json {
        print_json(&serde_json::to_string_pretty(&files)?)?;
    } else {
        for file in &files {
            print_text(file)?;
        }
    }

    Ok(())
}
