//! Paths command - local output directories for a job

use crate::context::Context;
use crate::output::print_text;
use anyhow::Result;
use colored::Colorize;
use rendersub_core::output::{create_local_paths, plan_local_paths};
use rendersub_core::scene::SceneInfo;
use std::path::Path;

pub fn run(config: Option<&Path>, scene: &Path, set: &[String], create: bool) -> Result<()> {
    let ctx = Context::new(config, scene)?;
    let form = ctx.form(set)?;
    let params = form.render_params()?;

    let info = SceneInfo::collect(&ctx.scene, params.renderer)?;
    let plan = if create {
        create_local_paths(&params, &info)?
    } else {
        plan_local_paths(&params, &info)
    };

    if plan.directories.is_empty() {
        print_text(&format!("{} No layers selected", "→".cyan()))?;
        return Ok(());
    }

    for dir in &plan.directories {
        print_text(dir)?;
    }
    if create {
        print_text(&format!(
            "{} {} director(ies) ready",
            "✓".green(),
            plan.directories.len()
        ))?;
    }

    Ok(())
}
