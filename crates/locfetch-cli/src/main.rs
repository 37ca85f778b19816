mod common;
mod features;
mod locales;
mod modules;

use clap::{Parser, Subcommand};
use console::style;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "locfetch")]
#[command(about = "Fetch localization bundles from the distribution service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download the per-language wording files of one project
    Locales(locales::LocalesArgs),
    /// Download and extract the configuration archive of one project
    Features(features::FeaturesArgs),
    /// Download several modules per language and merge them into one bundle
    Modules(modules::ModulesArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let is_usage_error = e.use_stderr();
            let _ = e.print();
            // Missing or invalid parameters exit 1 (documented exit codes),
            // --help/--version exit 0.
            return if is_usage_error {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let result = match cli.command {
        Commands::Locales(args) => locales::execute(args).await,
        Commands::Features(args) => features::execute(args).await,
        Commands::Modules(args) => modules::execute(args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red());
            ExitCode::from(1)
        }
    }
}
