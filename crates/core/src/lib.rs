//! AvdForge Core - shared types
//!
//! Error and configuration types used across the AvdForge workspace.

pub mod config;
pub mod error;

pub use config::{AppConfig, ConsoleConfig, SdkConfig};
pub use error::{AvdForgeError, Result};

/// AvdForge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "AvdForge";
