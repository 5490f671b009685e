//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Arbor: hierarchical ACL checks against a permission fixture
#[derive(Parser, Debug)]
#[command(name = "arbor", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ARBOR_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a user's or role's verdict on a resource
    Check(CheckArgs),
    /// Resolve a resource path to a resource id
    Locate(LocateArgs),
    /// Manage the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `arbor check`.
#[derive(Args, Debug, Clone)]
#[command(group = clap::ArgGroup::new("subject").required(true).args(["user", "role"]))]
#[command(group = clap::ArgGroup::new("target").required(true).args(["resource", "path"]))]
pub struct CheckArgs {
    /// Fixture file (TOML or JSON); defaults to store.fixture from config
    #[arg(short, long)]
    pub fixture: Option<PathBuf>,

    /// User to check
    #[arg(short, long)]
    pub user: Option<String>,

    /// Role to check (membership is not consulted)
    #[arg(short, long)]
    pub role: Option<String>,

    /// Resource node id
    #[arg(long)]
    pub resource: Option<u64>,

    /// Resource path such as Posts/edit/5
    #[arg(short, long)]
    pub path: Option<String>,

    /// Keep the most granular path field when locating the resource
    #[arg(long)]
    pub use_param: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `arbor locate`.
#[derive(Args, Debug, Clone)]
pub struct LocateArgs {
    /// Fixture file (TOML or JSON); defaults to store.fixture from config
    #[arg(short, long)]
    pub fixture: Option<PathBuf>,

    /// Resource path such as Posts/edit/5
    #[arg(short, long)]
    pub path: String,
}

/// `arbor config` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
