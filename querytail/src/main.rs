mod cli;

use clap::{Parser, Subcommand};
use querytail_core::config::{ClientConfig, ConfigOverrides};
use querytail_core::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "querytail",
    version,
    about = "querytail: run and stream log searches from the command line"
)]
struct Cli {
    /// Config file (default is $HOME/.querytail/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API token. Overrides the config file and QUERYTAIL_TOKEN.
    #[arg(short, long, global = true)]
    token: Option<String>,

    /// Server address, e.g. http://localhost:8080/. Overrides the config file
    /// and QUERYTAIL_ADDRESS.
    #[arg(short, long, global = true)]
    address: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a repository
    Search(cli::search::SearchArgs),
}

fn main() {
    let cli = Cli::parse();

    init_logging();

    let overrides = ConfigOverrides {
        address: cli.address,
        token: cli.token,
    };
    let config = match ClientConfig::load(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error loading config: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(address = %config.address, "using server");

    let result = match cli.command {
        Command::Search(args) => cli::search::run(config, args),
    };

    if let Err(e) = result {
        eprintln!("error running search: {e:#}");
        std::process::exit(1);
    }
}
