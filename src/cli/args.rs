//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::resource::ConflictPolicy;

/// Android icon generator and project patcher
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, JSON or TOML (relative to current directory)
    #[arg(short = 'C', long, global = true, default_value = "ppconfig.json", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate icons, copy them into the project and apply all patches
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Generate icons into the output directory only
    #[command(visible_alias = "i")]
    Icons,

    /// Apply app name, web url and workflow patches only
    #[command(visible_alias = "p")]
    Patch,
}

/// Run command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Keep the generated output directory after copying
    #[arg(short, long)]
    pub keep_output: bool,

    /// How to treat files that already exist in the destination
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,
}
