//! Submit command - send a job to the render service

use crate::context::Context;
use crate::output::print_text;
use anyhow::Result;
use colored::Colorize;
use rendersub_core::job::Field;
use rendersub_core::submit::Submitter;
use std::path::Path;

pub struct SubmitArgs {
    pub set: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub unique_scene: bool,
}

pub fn run(config: Option<&Path>, scene: &Path, args: SubmitArgs) -> Result<()> {
    let mut ctx = Context::new(config, scene)?;
    let mut form = ctx.form(&args.set)?;

    if let Some(username) = &args.username {
        form.set(Field::Username, username)?;
    }
    if let Some(password) = &args.password {
        form.set(Field::Password, password)?;
    }

    let submission = Submitter::new(&ctx.scene, &mut ctx.client)
        .path_mappings(ctx.config.path_mappings.clone())
        .unique_scene(args.unique_scene)
        .submit(&form)?;

    print_text(&format!(
        "{} Job submitted: {}",
        "✓".green(),
        submission.receipt.job_id.bold()
    ))?;
    print_text(&format!("  scene: {}", submission.scene_path.display()))?;
    if let Some(location) = &submission.receipt.location {
        print_text(&format!("  spooled: {}", location.display()))?;
    }
    if let Some(plan) = &submission.output {
        for dir in &plan.directories {
            print_text(&format!("  output: {}", dir))?;
        }
    }

    Ok(())
}
