//! CLI definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Mirror Dynalist folders into local OPML files
#[derive(Parser, Debug)]
#[command(name = "dlm", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API token (default: settings file, $DYNALIST_TOKEN, .dynalistrc)
    #[arg(short = 'T', long, global = true)]
    pub token: Option<String>,

    /// Settings file path (default: ./.dynalist.json)
    #[arg(long, global = true, env = "DYNALIST_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items with their IDs
    List {
        /// Folder or document to start from (default: root)
        id: Option<String>,

        /// Keep remote order instead of sorting by path
        #[arg(short = 'U', long)]
        no_sort: bool,
    },

    /// Show items as a tree
    Tree {
        /// Folder or document to start from (default: root)
        id: Option<String>,

        /// Keep remote order instead of sorting by path
        #[arg(short = 'U', long)]
        no_sort: bool,
    },

    /// Find items whose name matches a regular expression
    Find {
        /// Regular expression matched against item names
        pattern: String,

        /// Match case-insensitively
        #[arg(short, long)]
        ignore_case: bool,

        /// Keep remote order instead of sorting by path
        #[arg(short = 'U', long)]
        no_sort: bool,
    },

    /// Export a document to a file, or a folder to a directory
    Export(ExportArgs),

    /// Create a settings file for mirroring a folder
    Init {
        /// Remote folder to mirror
        root: String,

        /// Local directory, relative to the settings file
        #[arg(long)]
        dest: Option<String>,

        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Compare the local mirror with the remote folder
    Status {
        /// Keep recorded order instead of sorting by path
        #[arg(short = 'U', long)]
        no_sort: bool,
    },

    /// Re-export the mirrored folder and record its versions
    Update,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Document or folder ID
    pub id: String,

    /// Output file for a document (`-` for stdout) or directory for a folder
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Include the document's root node as the top outline
    #[arg(long)]
    pub root_node: bool,

    /// Omit checkbox, complete, colorLabel and listStyle attributes
    #[arg(long)]
    pub no_format: bool,

    /// Omit the collapsed attribute
    #[arg(long)]
    pub no_state: bool,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
