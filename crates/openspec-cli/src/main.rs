mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::list::ListArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "openspec",
    about = "Summarize OpenSpec change proposals, specs, and archived changes",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from openspec/)
    #[arg(long, global = true, env = "OPENSPEC_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List active changes (default), specs, or archived changes
    List(ListArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::List(args) => cmd::list::run(&root, args, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
