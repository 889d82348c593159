use std::path::PathBuf;

use clap::{Parser, Subcommand};
use proctree::config::ColorMode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(when: ColorWhen) -> Self {
        match when {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

/// proctree - live hierarchical task progress in the terminal
#[derive(Parser, Debug)]
#[command(name = "proctree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of .proctree.toml / the user config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Print only the final tree instead of repainting it live
    #[arg(long, global = true)]
    pub no_animation: bool,

    /// Render for this many columns instead of the terminal width
    #[arg(long, global = true)]
    pub width: Option<u16>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate the work described by a plan file
    Run {
        /// Path to the plan (TOML)
        plan: PathBuf,
    },

    /// Simulate a built-in sample build
    Demo,
}
