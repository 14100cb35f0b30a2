//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// df2b - translate build-file definitions into buildah invocations
#[derive(Parser)]
#[command(name = "df2b")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Translate build-file definitions into buildah invocations")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the target tool name (e.g. podman)
    #[arg(long, global = true)]
    pub tool: Option<String>,

    /// Override the working-container placeholder
    #[arg(long, global = true, value_name = "NAME")]
    pub container: Option<String>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Read newline-delimited JSON records from stdin and translate
    /// each one as a stage
    Stream,

    /// Translate a single build file (stdin when no path is given)
    #[command(alias = "tr")]
    Translate {
        /// Path to the build file
        path: Option<PathBuf>,
    },

    /// Parse a build file and pretty-print its instructions as JSON
    Parse {
        /// Path to the build file
        path: Option<PathBuf>,
    },
}
