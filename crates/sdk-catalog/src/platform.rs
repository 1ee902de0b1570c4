//! Android platform presets and resolution
//!
//! Maps version names, API level strings, and target names onto the known
//! public platform releases, falling back to custom (add-on) platforms
//! resolved through an external name-to-level lookup.

use once_cell::sync::Lazy;

/// API level for platforms whose level could not be resolved.
pub const API_LEVEL_UNKNOWN: i32 = -1;

/// ABI selection is mandatory for every platform from this API level on.
const ABI_REQUIRED_FROM_API: i32 = 15;

/// The one older level with a still-distributed non-Google image that
/// needs an explicit ABI.
const LEGACY_X86_API: i32 = 10;

/// Name substring of the relocated legacy x86 image. Historical quirk,
/// matched verbatim.
const LEGACY_X86_IMAGE_NAME: &str = "Intel Atom x86";

/// Lookup from custom target or display names to an API level.
///
/// Supplied by the caller; typically backed by a table of known add-on
/// targets. A miss yields [`API_LEVEL_UNKNOWN`], never a guessed value.
pub trait ApiLevelLookup {
    fn api_level(&self, name: &str) -> Option<i32>;
}

impl ApiLevelLookup for std::collections::HashMap<String, i32> {
    fn api_level(&self, name: &str) -> Option<i32> {
        self.get(name).copied()
    }
}

/// Lookup that knows no custom platforms.
pub struct NoApiLevelLookup;

impl ApiLevelLookup for NoApiLevelLookup {
    fn api_level(&self, _name: &str) -> Option<i32> {
        None
    }
}

/// A resolved Android platform: either one of the known public releases
/// or a custom (add-on) target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidPlatform {
    /// Display name ("5.0") for presets, raw input for custom targets
    pub name: String,
    /// API level; [`API_LEVEL_UNKNOWN`] for unresolvable custom targets
    pub api_level: i32,
    /// Whether this is a custom target rather than a known release
    pub custom: bool,
}

impl AndroidPlatform {
    fn preset(name: &str, api_level: i32) -> Self {
        Self {
            name: name.to_string(),
            api_level,
            custom: false,
        }
    }

    fn custom(name: &str, api_level: i32) -> Self {
        Self {
            name: name.to_string(),
            api_level,
            custom: true,
        }
    }

    /// Canonical SDK target name ("android-21"); custom targets keep
    /// their own name.
    pub fn target_name(&self) -> String {
        if self.custom {
            self.name.clone()
        } else {
            format!("android-{}", self.api_level)
        }
    }

    /// Whether the level could not be derived.
    pub fn is_unresolved(&self) -> bool {
        self.api_level == API_LEVEL_UNKNOWN
    }

    /// Whether an emulator image for this platform needs an explicit ABI.
    ///
    /// Hard-coded historical table, not inferred: API 10 shipped one
    /// non-Google image that requires an ABI, every platform from API 15
    /// on requires one, and the relocated legacy x86 image is matched by
    /// name.
    pub fn requires_explicit_abi(&self) -> bool {
        self.api_level == LEGACY_X86_API
            || self.api_level >= ABI_REQUIRED_FROM_API
            || self.name.contains(LEGACY_X86_IMAGE_NAME)
    }
}

/// The known public platform releases, oldest first.
static PRESETS: Lazy<Vec<AndroidPlatform>> = Lazy::new(|| {
    vec![
        AndroidPlatform::preset("1.1", 2),
        AndroidPlatform::preset("1.5", 3),
        AndroidPlatform::preset("1.6", 4),
        AndroidPlatform::preset("2.0", 5),
        AndroidPlatform::preset("2.0.1", 6),
        AndroidPlatform::preset("2.1", 7),
        AndroidPlatform::preset("2.2", 8),
        AndroidPlatform::preset("2.3", 9),
        AndroidPlatform::preset("2.3.3", 10),
        AndroidPlatform::preset("3.0", 11),
        AndroidPlatform::preset("3.1", 12),
        AndroidPlatform::preset("3.2", 13),
        AndroidPlatform::preset("4.0", 14),
        AndroidPlatform::preset("4.0.3", 15),
        AndroidPlatform::preset("4.1", 16),
        AndroidPlatform::preset("4.2", 17),
        AndroidPlatform::preset("4.3", 18),
        AndroidPlatform::preset("4.4", 19),
        AndroidPlatform::preset("4.4W", 20),
        AndroidPlatform::preset("5.0", 21),
        AndroidPlatform::preset("5.1", 22),
        AndroidPlatform::preset("6.0", 23),
        AndroidPlatform::preset("7.0", 24),
        AndroidPlatform::preset("7.1", 25),
        AndroidPlatform::preset("8.0", 26),
        AndroidPlatform::preset("8.1", 27),
        AndroidPlatform::preset("9.0", 28),
        AndroidPlatform::preset("10.0", 29),
        AndroidPlatform::preset("11.0", 30),
        AndroidPlatform::preset("12.0", 31),
        AndroidPlatform::preset("12L", 32),
        AndroidPlatform::preset("13.0", 33),
        AndroidPlatform::preset("14.0", 34),
    ]
});

/// All known platform presets, oldest first.
pub fn presets() -> &'static [AndroidPlatform] {
    &PRESETS
}

/// Resolve a version name, API level string, or target name to a platform.
///
/// Blank input resolves to `None`. Input matching no preset becomes a
/// custom platform whose level comes from `lookup`; a lookup miss leaves
/// the level at [`API_LEVEL_UNKNOWN`] so callers can detect and report it.
pub fn resolve_platform(input: &str, lookup: &dyn ApiLevelLookup) -> Option<AndroidPlatform> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for preset in PRESETS.iter() {
        if preset.name == input
            || preset.api_level.to_string() == input
            || preset.target_name() == input
        {
            return Some(preset.clone());
        }
    }

    let api_level = lookup.api_level(input).unwrap_or(API_LEVEL_UNKNOWN);
    Some(AndroidPlatform::custom(input, api_level))
}
