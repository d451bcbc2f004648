mod editor;
mod errors;
mod input;
mod shell;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use svctl_core::{Config, Controller, Output, StdoutOutput};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::editor::EditorInput;
use crate::errors::{CliError, Result};
use crate::input::ReaderInput;

/// svctl - interactive controller for runit services
#[derive(Parser, Debug)]
#[command(name = "svctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service directory (defaults to $SVDIR, then /service)
    #[arg(short = 'd', long = "svdir", value_name = "DIR")]
    pub svdir: Option<PathBuf>,

    /// Neither load nor save prompt history
    #[arg(long)]
    pub no_history: bool,

    /// Never colour status labels
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&cli);
    check_basedir(&config.basedir)?;
    debug!("service directory: {}", config.basedir.display());

    if config.color {
        colored::control::set_override(true);
    }

    let output: Arc<dyn Output> = Arc::new(StdoutOutput);
    let mut controller = Controller::with_loaded_history(&config, Arc::clone(&output));

    let interrupts = input::interrupts();
    let result = if std::io::stdin().is_terminal() {
        let mut editor = EditorInput::new(&config.basedir, controller.history(), interrupts)?;
        shell::run(&mut controller, output.as_ref(), &mut editor).await
    } else {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut reader = ReaderInput::new(stdin, interrupts, Arc::clone(&output));
        shell::run(&mut controller, output.as_ref(), &mut reader).await
    };

    controller.persist_history();
    result
}

fn build_config(cli: &Cli) -> Config {
    let history = if cli.no_history {
        None
    } else {
        Config::default_history_path()
    };
    Config::new(Config::resolve_basedir(cli.svdir.as_deref()))
        .with_history(history)
        .with_color(!cli.no_color && std::io::stdout().is_terminal())
}

fn check_basedir(path: &Path) -> Result<()> {
    let meta = std::fs::metadata(path).map_err(|source| CliError::BaseDirNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(CliError::BaseDirNotDir(path.to_path_buf()));
    }
    Ok(())
}
