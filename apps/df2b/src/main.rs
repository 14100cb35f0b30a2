//! df2b - translate build-file definitions into buildah invocations
//!
//! This is the CLI application that wires the record stream, the
//! build-file frontend, and the translation engine together.

mod cli;
mod error;
mod stream;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use clap::Parser;
use df2b_config::Config;
use df2b_translate::Engine;
use df2b_types::StageContext;
use std::io::Read;
use std::path::Path;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.debug);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("application error: {}", e);
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Main application logic. Returns `false` when any stage failed.
fn run(cli: Cli) -> Result<bool, CliError> {
    info!("starting df2b v{}", env!("CARGO_PKG_VERSION"));

    // Configuration precedence: file, then environment, then CLI flags.
    let mut config = Config::load_or_default(cli.global.config.as_deref())?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global)?;

    let mut engine = Engine::new(config.tooling());

    match cli.command {
        Commands::Stream => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let summary = stream::process(stdin.lock(), stdout.lock(), &mut engine)?;
            Ok(summary.failed == 0)
        }

        Commands::Translate { path } => {
            let (id, text) = read_source(path.as_deref())?;
            let outcome = engine.run_stage(StageContext::new(id), &text);
            for line in &outcome.lines {
                println!("{line}");
            }
            for err in &outcome.errors {
                eprintln!("{err}");
            }
            Ok(!outcome.failed())
        }

        Commands::Parse { path } => {
            let (_, text) = read_source(path.as_deref())?;
            let instructions =
                df2b_parser::parse(&text).map_err(df2b_errors::Error::from)?;
            let pretty = serde_json::to_string_pretty(&instructions)
                .map_err(df2b_errors::Error::from)?;
            println!("{pretty}");
            Ok(true)
        }
    }
}

/// Read the build file from a path, or stdin when none is given.
fn read_source(path: Option<&Path>) -> Result<(String, String), CliError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok((path.display().to_string(), text))
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(("<stdin>".to_string(), text))
        }
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) -> Result<(), CliError> {
    if let Some(tool) = &global.tool {
        if tool.trim().is_empty() {
            return Err(CliError::InvalidArguments(
                "--tool must not be empty".to_string(),
            ));
        }
        config.translate.tool = tool.clone();
    }
    if let Some(container) = &global.container {
        if container.trim().is_empty() {
            return Err(CliError::InvalidArguments(
                "--container must not be empty".to_string(),
            ));
        }
        config.translate.container = container.clone();
    }
    Ok(())
}

/// Initialize tracing/logging to stderr
fn init_tracing(debug_enabled: bool) {
    let default_filter = if debug_enabled {
        "info,df2b=debug,df2b_translate=debug,df2b_parser=debug"
    } else {
        "warn,df2b=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_read_source_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Dockerfile");
        std::fs::write(&path, "FROM alpine\n").unwrap();

        let (id, text) = read_source(Some(&path)).unwrap();
        assert!(id.ends_with("Dockerfile"));
        assert_eq!(text, "FROM alpine\n");
    }

    #[test]
    fn test_cli_overrides_win_over_file_config() {
        let mut config = Config::default();
        let cli = Cli::parse_from(["df2b", "stream", "--tool", "podman"]);
        apply_cli_config(&mut config, &cli.global).unwrap();
        assert_eq!(config.translate.tool, "podman");
        assert_eq!(config.translate.container, "<container>");
    }

    #[test]
    fn test_empty_tool_override_rejected() {
        let mut config = Config::default();
        let cli = Cli::parse_from(["df2b", "stream", "--tool", " "]);
        assert!(apply_cli_config(&mut config, &cli.global).is_err());
    }
}
