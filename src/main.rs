use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a scancode table into a keyset image
    Build(cmd::build::BuildArgs),
    /// Summarise the blocks of a keyset image
    Inspect(cmd::inspect::InspectArgs),
    /// Feed raw scancode bytes through a keyset image
    Decode(cmd::decode::DecodeArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing ScanForge...");

    let result = match &cli.command {
        Commands::Build(args) => cmd::build::run(args, matches.subcommand_matches("build")),
        Commands::Inspect(args) => cmd::inspect::run(args),
        Commands::Decode(args) => cmd::decode::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
