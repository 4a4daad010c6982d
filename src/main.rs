use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zcalc::calculator::{ClipboardBackend, MemoryClipboard, SystemClipboard};
use zcalc::config::Config;
use zcalc::shell::{Shell, spawn_stdin_reader};

/// A keyboard-driven arithmetic calculator.
///
/// Reads key tokens from stdin, e.g. `12 + 3 Enter`. Named keys are Enter,
/// Escape, Delete, Backspace and CE; menu commands are :copy, :paste,
/// :clear, :about and :quit.
#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about)]
struct Args {
    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// How long error messages stay on the display
    #[arg(long, value_name = "MS")]
    error_timeout_ms: Option<u64>,

    /// Print renders as JSON lines
    #[arg(long)]
    json: bool,

    /// Keep Copy/Paste inside the process instead of using the system clipboard
    #[arg(long)]
    no_clipboard: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;

    if let Some(ms) = args.error_timeout_ms {
        config.error_timeout_ms = ms;
    }
    if args.json {
        config.json = true;
    }
    if args.no_clipboard {
        config.clipboard = false;
    }

    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let config = load_config(&args)?;
    info!(version = zcalc::version(), ?config, "starting zcalc");

    let clipboard: Box<dyn ClipboardBackend> = if config.clipboard {
        Box::new(SystemClipboard)
    } else {
        Box::new(MemoryClipboard::new())
    };

    let (tx, rx) = flume::unbounded();
    spawn_stdin_reader(tx.clone());

    let mut shell = Shell::new(&config, clipboard, tx, io::stdout());
    shell.run(rx).await.context("Failed to write output")?;

    Ok(())
}
