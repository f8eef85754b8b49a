mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Expand {
            template,
            tokens,
            absent,
            leave_unmatched,
        } => commands::expand::run(&template, tokens.as_deref(), absent, leave_unmatched),
        Commands::Files { scene, json } => commands::files::run(&scene, json),
        Commands::Info {
            scene,
            renderer,
            json,
        } => commands::info::run(&scene, &renderer, json),
        Commands::Form { scene, json } => commands::form::run(config, &scene, json),
        Commands::Paths { scene, set, create } => commands::paths::run(config, &scene, &set, create),
        Commands::Submit {
            scene,
            set,
            username,
            password,
            unique_scene,
        } => commands::submit::run(
            config,
            &scene,
            commands::submit::SubmitArgs {
                set,
                username,
                password,
                unique_scene,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
