//! SDK Metadata Catalog
//!
//! Handles resolution and inventory of Android SDK metadata:
//! - Version strings as printed by the SDK tools
//! - Platform and screen density presets
//! - Parsing of `avdmanager`/`sdkmanager` list output into typed catalogs

pub mod density;
pub mod packages;
pub mod platform;
pub mod sdk_tools;
pub mod targets;
pub mod version;

pub use density::{resolve_density, ScreenDensity};
pub use packages::{parse_package_list, Catalog, PackageCategory, SdkPackage};
pub use platform::{
    resolve_platform, AndroidPlatform, ApiLevelLookup, NoApiLevelLookup, API_LEVEL_UNKNOWN,
};
pub use sdk_tools::{SdkToolError, SdkTools};
pub use targets::{parse_target_list, Target, TargetKind, TargetParse};
pub use version::Version;
