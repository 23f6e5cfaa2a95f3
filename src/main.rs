// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> ConfigLoader --> Logging --> Command Dispatch
//!   Version | Config | Inis | Init | Package | Outdated | Run | List
//! ```

use std::process::ExitCode;

use avail_pack::cli::global::GlobalOptions;
use avail_pack::cli::{self, Command};
use avail_pack::cmd::config::{run_config_command, run_inis_command};
use avail_pack::cmd::list::run_list_command;
use avail_pack::cmd::outdated::run_outdated_command;
use avail_pack::cmd::package::{run_init_command, run_package_command};
use avail_pack::cmd::run::run_tasks_command;
use avail_pack::config::loader::ConfigLoader;
use avail_pack::config::{Config, ENV_PREFIX};
use avail_pack::logging::init_logging;
use avail_pack::logging::{LogConfig, LogLevel};
use avail_pack::project::AvailProject;
use avail_pack::resolve::MavenMetadataSource;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let config = load_config(&cli.global);

    let log_config = build_log_config(&cli.global, config.as_ref().ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match config {
        Ok(config) => dispatch_command(&cli, config).await,
        Err(e) => Err(e.context("Failed to load config")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// CLI flags win; otherwise the configured levels apply.
fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    let configured = config.map(|c| &c.global);

    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| configured.map(|g| g.output_log_level))
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| configured.map(|g| g.file_log_level))
        .unwrap_or(console_level);

    let log_file = global
        .log_file
        .clone()
        .or_else(|| configured.and_then(|g| g.log_file.clone()));

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(log_file)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: Config) -> avail_pack::error::Result<()> {
    let dry_run = config.global.dry;

    match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global)?;
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::List(args)) => run_list_command(args, &config.aliases),
        Some(Command::Config) => {
            let project = AvailProject::from_config(&config)?;
            run_config_command(&project);
            Ok(())
        }
        Some(Command::Init(args)) => {
            let project = AvailProject::from_config(&config)?;
            run_init_command(args, project, dry_run).await
        }
        Some(Command::Package(args)) => {
            let project = AvailProject::from_config(&config)?;
            run_package_command(args, project, dry_run).await
        }
        Some(Command::Outdated) => {
            let project = AvailProject::from_config(&config)?;
            let versions = MavenMetadataSource::new(project.repositories().to_vec());
            run_outdated_command(&project, &versions).await;
            Ok(())
        }
        Some(Command::Run(args)) => {
            let project = AvailProject::from_config(&config)?;
            run_tasks_command(args, project, &config.aliases, dry_run).await
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> avail_pack::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().with_project_dir(global.project_dir());
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(global.default_config_file());
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .with_env_prefix(ENV_PREFIX)
        .apply_overrides(&global.to_config_overrides())
}

fn load_config(global: &GlobalOptions) -> avail_pack::error::Result<Config> {
    build_config_loader(global)?.build()
}
