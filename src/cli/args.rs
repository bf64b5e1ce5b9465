//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Compose and print ASCII/Unicode trees from TOML documents and directories
#[derive(Parser, Debug)]
#[command(name = "treeprint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Draw with ASCII glyphs instead of Unicode box drawing
    #[arg(long, global = true)]
    pub ascii: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the structure of a TOML document
    Toml {
        /// TOML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Show key names only
        #[arg(long, conflicts_with = "values")]
        names: bool,
        /// Annotate keys with their values
        #[arg(long)]
        values: bool,
        /// Maximum table nesting
        #[arg(short = 'L', long)]
        max_depth: Option<usize>,
    },

    /// Render a directory hierarchy
    Dir {
        /// Directory (default: cwd)
        #[arg(value_hint = ValueHint::DirPath, default_value = ".")]
        dir: PathBuf,
        /// Maximum depth to descend
        #[arg(short = 'L', long)]
        max_depth: Option<usize>,
        /// Include hidden entries
        #[arg(short, long)]
        all: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
}
