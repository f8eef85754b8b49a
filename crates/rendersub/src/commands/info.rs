//! Info command - show the scene info sent with a job

use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;
use rendersub_core::Renderer;
use rendersub_core::scene::{SceneInfo, SceneSnapshot};
use std::path::Path;

pub fn run(scene: &Path, renderer: &str, json: bool) -> Result<()> {
    let renderer: Renderer = renderer.parse()?;
    let scene = SceneSnapshot::from_file(scene)?;
    let info = SceneInfo::collect(&scene, renderer)?;

    if json {
        print_json(&serde_json::to_string_pretty(&info)?)?;
    } else {
        render_human(&info, renderer)?;
    }

    Ok(())
}

fn render_human(info: &SceneInfo, renderer: Renderer) -> Result<()> {
    print_text(&format!("{} {}", "Renderer:".bold(), renderer.label()))?;
    print_text(&format!(
        "{} {} (padding {})",
        "Extension:".bold(),
        info.extension,
        info.padding
    ))?;
    print_text(&format!("{} {}", "Default prefix:".bold(), info.file_prefix.default))?;

    print_text(&format!("\n{} Render layers:", "→".cyan()))?;
    for layer in &info.render_layers {
        let prefix = info
            .file_prefix
            .layers
            .get(layer)
            .map(|p| format!(" [{}]", p))
            .unwrap_or_default();
        print_text(&format!("  {}{}", layer, prefix.dimmed()))?;

        if let Some(passes) = info.layer_passes.get(layer).filter(|p| !p.is_empty()) {
            print_text(&format!("    passes: {}", passes.join(", ")))?;
        }
    }

    print_text(&format!("\n{} Files ({}):", "→".cyan(), info.files.len()))?;
    for file in &info.files {
        print_text(&format!("  {}", file))?;
    }

    if !info.references.is_empty() {
        print_text(&format!("\n{} References:", "→".cyan()))?;
        for reference in &info.references {
            print_text(&format!("  {}", reference))?;
        }
    }

    print_text(&format!("\n{} {}", "Plugins:".bold(), info.plugins.join(", ")))?;
    Ok(())
}
