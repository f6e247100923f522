// Commands module - handles CLI command execution

use anyhow::{Context, Result};
use std::path::Path;

pub mod report;

pub use report::{ReportOptions, fold_events, run_report, write_report};

use crate::cli::Cli;
use crate::config::{self, Config};

/// Handle shell completion
pub fn handle_completion(shell_type: &str) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{Shell, generate};

    let shell = match shell_type.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "elvish" => Shell::Elvish,
        "powershell" => Shell::PowerShell,
        _ => {
            anyhow::bail!(
                "Unsupported shell: {}. Supported: bash, zsh, fish, elvish, powershell",
                shell_type
            );
        }
    };

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut stdout = std::io::stdout();

    generate(shell, &mut cmd, name, &mut stdout);

    Ok(())
}

/// Print the effective configuration
pub fn handle_show_config(cli: &Cli, file_config: Option<&Config>) {
    let defaults = Config::default();
    let config = file_config.unwrap_or(&defaults);

    println!("Current configuration:");
    println!("\n  Effective settings:");
    println!(
        "    Input: {}",
        cli.file
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| String::from("<stdin>"))
    );
    println!("    Display: {:?}", cli.display_mode(config));
    println!("    Color: {:?}", cli.color_mode(config));
    println!("    Attribution: {}", cli.attribution_mode(config));
    println!(
        "    Echo: {}",
        if cli.echo_enabled(config) {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!(
        "    Summary: {}",
        if cli.summary_enabled(config) {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("    Separator width: {}", config.report.separator_width);
    println!(
        "    Markers: failed {:?}, passed {:?}, skipped {:?}",
        config.markers.failed, config.markers.passed, config.markers.skipped
    );

    if file_config.is_some() {
        println!("\n  Configuration file loaded");
    } else {
        println!("\n  No configuration file loaded");
        println!(
            "  Create one with: gotest-report --init-config {}.toml",
            config::CONFIG_FILE_NAME
        );
    }

    print_precedence();
}

/// Write the default configuration to `path`
pub fn handle_init_config(path: &Path) -> Result<()> {
    let toml_content = Config::default().to_toml();
    std::fs::write(path, toml_content)
        .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

    println!("Configuration file created: {}", path.display());
    println!("\nYou can now edit the file to customize your settings.");
    print_precedence();
    Ok(())
}

fn print_precedence() {
    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Built-in defaults (lowest)");
}
