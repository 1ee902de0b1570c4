//! CLI commands for AvdForge
//!
//! Provides command-line interface functionality for automation and scripting.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use avdforge_core::error::AvdForgeError;
use avdforge_emulator_console::{load_snapshot, save_snapshot, ConsoleClient};
use avdforge_sdk_catalog::{
    resolve_density, resolve_platform, NoApiLevelLookup, PackageCategory, SdkTools, TargetKind,
};

/// List targets command options
pub struct ListTargetsCommand {
    pub sdk_path: PathBuf,
}

impl ListTargetsCommand {
    /// Execute the list-targets command
    pub async fn execute(&self) -> Result<()> {
        info!("Listing SDK targets under {:?}", self.sdk_path);

        let tools = SdkTools::new(&self.sdk_path)?;
        let parsed = tools.list_targets().await?;

        for target in &parsed.targets {
            let kind = match target.kind {
                TargetKind::Platform => "platform",
                TargetKind::AddOn => "add-on",
            };
            println!(
                "{:<40} {:<10} API {:<4} rev {}",
                target.id, kind, target.api_level, target.revision
            );
        }
        if parsed.skipped > 0 {
            println!("({} unparseable target blocks skipped)", parsed.skipped);
        }

        Ok(())
    }
}

/// List packages command options
pub struct ListPackagesCommand {
    pub sdk_path: PathBuf,
    pub category: Option<PackageCategory>,
}

impl ListPackagesCommand {
    /// Execute the list-packages command
    pub async fn execute(&self) -> Result<()> {
        info!("Listing SDK packages under {:?}", self.sdk_path);

        let tools = SdkTools::new(&self.sdk_path)?;
        let catalog = tools.list_packages().await?;

        for package in catalog.sorted() {
            if let Some(category) = self.category {
                if package.category != category {
                    continue;
                }
            }
            let label = match package.category {
                PackageCategory::Installed => "installed",
                PackageCategory::Available => "available",
                PackageCategory::Update => "update",
            };
            println!(
                "{:<50} {:<12} {:<10} {}",
                package.id, package.version, label, package.description
            );
        }
        if catalog.dropped > 0 {
            println!("({} unparseable package rows dropped)", catalog.dropped);
        }

        Ok(())
    }
}

/// Resolve command options
pub struct ResolveCommand {
    pub platform: String,
    pub density: Option<String>,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub async fn execute(&self) -> Result<()> {
        let platform = resolve_platform(&self.platform, &NoApiLevelLookup)
            .ok_or_else(|| AvdForgeError::NotFound(format!("platform '{}'", self.platform)))?;

        if platform.is_unresolved() {
            return Err(AvdForgeError::NotFound(format!(
                "API level for custom platform '{}'",
                platform.name
            ))
            .into());
        }

        println!("Platform:     {}", platform.name);
        println!("API level:    {}", platform.api_level);
        println!("Target:       {}", platform.target_name());
        println!("Custom:       {}", platform.custom);
        println!("Explicit ABI: {}", platform.requires_explicit_abi());

        if let Some(density_input) = &self.density {
            let density = resolve_density(density_input)
                .ok_or_else(|| AvdForgeError::NotFound(format!("density '{}'", density_input)))?;
            println!("Density:      {} ({} dpi)", density, density.dpi);
        }

        Ok(())
    }
}

/// Snapshot action selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotAction {
    Save,
    Load,
}

/// Snapshot command options
pub struct SnapshotCommand {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
    pub action: SnapshotAction,
    pub name: String,
}

impl SnapshotCommand {
    /// Execute the snapshot command
    pub async fn execute(&self) -> Result<()> {
        let client = ConsoleClient::new(self.host.clone(), self.port).with_timeout(self.timeout);

        match self.action {
            SnapshotAction::Save => {
                save_snapshot(&client, &self.name).await?;
                println!("Snapshot '{}' saved", self.name);
            }
            SnapshotAction::Load => {
                load_snapshot(&client, &self.name).await?;
                println!("Snapshot '{}' loaded", self.name);
            }
        }

        Ok(())
    }
}
