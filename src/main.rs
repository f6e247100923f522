// Main entry point for gotest-report

use anyhow::Result;
use clap::Parser;
use tracing::info;

use gotest_report::cli::Cli;
use gotest_report::commands;
use gotest_report::config::Config;
use gotest_report::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.debug);
    info!("Starting gotest-report v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from file (if exists)
    let file_config = Config::load();

    if cli.config {
        commands::handle_show_config(&cli, file_config.as_ref());
        return Ok(());
    }

    if let Some(path) = &cli.init_config {
        return commands::handle_init_config(path);
    }

    if let Some(shell_type) = &cli.completion {
        return commands::handle_completion(shell_type);
    }

    let config = file_config.unwrap_or_default();
    commands::run_report(&cli, &config)
}
