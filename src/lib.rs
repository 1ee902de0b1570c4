//! AvdForge
//!
//! Automated Android emulator provisioning for build pipelines:
//! resolves platform and density selections against the known presets,
//! inventories the local SDK through its command-line tools, and
//! drives snapshot save/load over the emulator console.

pub mod commands;

pub use avdforge_core as core;
pub use avdforge_emulator_console as emulator_console;
pub use avdforge_sdk_catalog as sdk_catalog;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "AvdForge";
