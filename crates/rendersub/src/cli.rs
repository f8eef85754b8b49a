//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rendersub")]
#[command(version, about = "Submit 3D scenes to a cloud render service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./rendersub.toml, then the user config directory)
    #[arg(long, global = true, env = "RENDERSUB_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a path template
    Expand {
        /// Template, e.g. "images/<Layer>/shot[_<RenderPass>].exr"
        template: String,

        /// Token values as shell-style key=value words
        #[arg(long)]
        tokens: Option<String>,

        /// Token known to have no value (rendered as <NAME>)
        #[arg(long, value_name = "NAME")]
        absent: Vec<String>,

        /// Keep unknown tokens as <Name> instead of dropping them
        #[arg(long)]
        leave_unmatched: bool,
    },

    /// List files the scene depends on
    Files {
        /// Scene snapshot (JSON)
        #[arg(long)]
        scene: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Show the scene info sent with a job
    Info {
        /// Scene snapshot (JSON)
        #[arg(long)]
        scene: PathBuf,

        /// Renderer: vray, mentalray or software
        #[arg(long, default_value = "vray")]
        renderer: String,

        #[arg(long)]
        json: bool,
    },

    /// Show the submit form with its initial values
    Form {
        /// Scene snapshot (JSON)
        #[arg(long)]
        scene: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Show (or create) the local output directories for a job
    Paths {
        /// Scene snapshot (JSON)
        #[arg(long)]
        scene: PathBuf,

        /// Form field assignment
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Create the directories
        #[arg(long)]
        create: bool,
    },

    /// Submit a job
    Submit {
        /// Scene snapshot (JSON)
        #[arg(long)]
        scene: PathBuf,

        /// Form field assignment
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        #[arg(long, env = "RENDERSUB_USERNAME")]
        username: Option<String>,

        #[arg(long, env = "RENDERSUB_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Submit a uniquely named copy of the scene file
        #[arg(long)]
        unique_scene: bool,
    },
}
