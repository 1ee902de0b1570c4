//! AvdForge - Android emulator provisioning for build pipelines
//!
//! Main entry point: initializes logging, loads configuration, and
//! dispatches to the CLI commands.

use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use avdforge::commands::{
    ListPackagesCommand, ListTargetsCommand, ResolveCommand, SnapshotAction, SnapshotCommand,
};
use avdforge::core::config::AppConfig;
use avdforge::core::error::AvdForgeError;
use avdforge::sdk_catalog::PackageCategory;
use avdforge::{APP_NAME, VERSION};

const USAGE: &str = "\
Usage: avdforge <command> [options]

Commands:
  targets                          List SDK targets via avdmanager
  packages [--installed|--available|--updates]
                                   List SDK packages via sdkmanager
  resolve <platform> [density]     Resolve a platform (and density) selection
  snapshot <save|load> <name> [--host HOST] [--port PORT]
                                   Save or load an emulator snapshot
";

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("{} v{} starting...", APP_NAME, VERSION);

    let config = AppConfig::load().await?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("targets") => {
            let sdk_path = require_sdk_path(&config)?;
            ListTargetsCommand { sdk_path }.execute().await
        }
        Some("packages") => {
            let category = match args.get(1).map(String::as_str) {
                Some("--installed") => Some(PackageCategory::Installed),
                Some("--available") => Some(PackageCategory::Available),
                Some("--updates") => Some(PackageCategory::Update),
                Some(other) => bail!("Unknown packages option: {}\n\n{}", other, USAGE),
                None => None,
            };
            let sdk_path = require_sdk_path(&config)?;
            ListPackagesCommand { sdk_path, category }.execute().await
        }
        Some("resolve") => {
            let Some(platform) = args.get(1).cloned() else {
                bail!("resolve needs a platform argument\n\n{}", USAGE);
            };
            let density = args.get(2).cloned();
            ResolveCommand { platform, density }.execute().await
        }
        Some("snapshot") => {
            let command = parse_snapshot_args(&args[1..], &config)?;
            command.execute().await
        }
        Some("--version") => {
            println!("{} {}", APP_NAME, VERSION);
            Ok(())
        }
        _ => {
            eprint!("{}", USAGE);
            Ok(())
        }
    }
}

fn require_sdk_path(config: &AppConfig) -> Result<std::path::PathBuf> {
    config.get_sdk_path().ok_or_else(|| {
        AvdForgeError::NotFound(
            "Android SDK (set sdk_path in config or ANDROID_HOME)".to_string(),
        )
        .into()
    })
}

fn parse_snapshot_args(args: &[String], config: &AppConfig) -> Result<SnapshotCommand> {
    let action = match args.first().map(String::as_str) {
        Some("save") => SnapshotAction::Save,
        Some("load") => SnapshotAction::Load,
        _ => bail!("snapshot needs 'save' or 'load'\n\n{}", USAGE),
    };
    let Some(name) = args.get(1).cloned() else {
        bail!("snapshot needs a name argument\n\n{}", USAGE);
    };

    let mut host = config.console.host.clone();
    let mut port = config.console.default_port;
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--host" => {
                host = rest
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--host needs a value"))?
                    .clone();
            }
            "--port" => {
                port = rest
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--port needs a value"))?
                    .parse()?;
            }
            other => bail!("Unknown snapshot option: {}\n\n{}", other, USAGE),
        }
    }

    Ok(SnapshotCommand {
        host,
        port,
        timeout: Duration::from_millis(config.console.timeout_ms),
        action,
        name,
    })
}
