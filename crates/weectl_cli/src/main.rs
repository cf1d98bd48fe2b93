use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use weectl_cli::commands::station_cmd::{self, StationCommands};
use weectl_cli::prompter::TerminalPrompter;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// weectl: Create and maintain WeeWX station configuration files
#[derive(Parser, Debug)]
#[command(name = "weectl")]
#[command(about = "Create and maintain WeeWX station configuration files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or reconfigure a station configuration file
    #[command(subcommand)]
    Station(StationCommands),

    /// Show the CLI version
    Version,
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("WEECTL_LOG"))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Station(cmd) => {
            let resources = station_cmd::resources_dir();
            let mut prompter = TerminalPrompter;
            if let Err(e) = station_cmd::execute(cmd, &mut prompter, resources.as_deref()) {
                error!("Error: {e}");
                eprintln!("Error: {e}");
                std::process::exit(e.exit_code());
            }
        }
        Commands::Version => {
            println!(
                "weectl version {}",
                option_env!("WEECTL_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
        }
    }
}
