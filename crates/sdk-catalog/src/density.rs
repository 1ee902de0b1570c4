//! Screen density presets and resolution
//!
//! The standard Android density buckets, including the numeric-only
//! buckets that never got an alias, plus custom dpi values.

use std::fmt;

use once_cell::sync::Lazy;

/// A screen pixel-density bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDensity {
    /// Dots per inch
    pub dpi: u32,
    /// Canonical alias ("hdpi") for preset buckets; custom densities
    /// have none
    pub alias: Option<&'static str>,
}

impl ScreenDensity {
    const fn preset(dpi: u32, alias: &'static str) -> Self {
        Self {
            dpi,
            alias: Some(alias),
        }
    }

    const fn numeric(dpi: u32) -> Self {
        Self { dpi, alias: None }
    }

    fn custom(dpi: u32) -> Self {
        Self { dpi, alias: None }
    }
}

impl fmt::Display for ScreenDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alias {
            Some(alias) => write!(f, "{}", alias),
            None => write!(f, "{}", self.dpi),
        }
    }
}

/// The standard density buckets, lowest first.
static PRESETS: Lazy<Vec<ScreenDensity>> = Lazy::new(|| {
    vec![
        ScreenDensity::preset(120, "ldpi"),
        ScreenDensity::preset(160, "mdpi"),
        ScreenDensity::preset(213, "tvdpi"),
        ScreenDensity::preset(240, "hdpi"),
        ScreenDensity::numeric(280),
        ScreenDensity::preset(320, "xhdpi"),
        ScreenDensity::numeric(360),
        ScreenDensity::numeric(400),
        ScreenDensity::numeric(420),
        ScreenDensity::preset(480, "xxhdpi"),
        ScreenDensity::numeric(560),
        ScreenDensity::preset(640, "xxxhdpi"),
    ]
});

/// All standard density buckets, lowest first.
pub fn presets() -> &'static [ScreenDensity] {
    &PRESETS
}

/// Resolve an alias or dpi string to a density.
///
/// Blank input resolves to `None`. Numeric input that matches no bucket
/// becomes a custom density; non-numeric unmatched input is an explicit
/// resolution failure.
pub fn resolve_density(input: &str) -> Option<ScreenDensity> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    for preset in PRESETS.iter() {
        let alias_match = preset.alias.map(|a| a == input).unwrap_or(false);
        if alias_match || preset.dpi.to_string() == input {
            return Some(*preset);
        }
    }

    input.parse::<u32>().ok().map(ScreenDensity::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_alias() {
        let density = resolve_density("hdpi").unwrap();
        assert_eq!(density.dpi, 240);
        assert_eq!(density.alias, Some("hdpi"));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve_density("XHDPI"), resolve_density("xhdpi"));
    }

    #[test]
    fn test_resolve_by_dpi_string() {
        let density = resolve_density("213").unwrap();
        assert_eq!(density.alias, Some("tvdpi"));
    }

    #[test]
    fn test_numeric_only_bucket_has_no_alias() {
        let density = resolve_density("420").unwrap();
        assert_eq!(density.dpi, 420);
        assert!(density.alias.is_none());
    }

    #[test]
    fn test_custom_density() {
        let density = resolve_density("195").unwrap();
        assert_eq!(density.dpi, 195);
        assert!(density.alias.is_none());
    }

    #[test]
    fn test_blank_and_garbage_are_none() {
        assert!(resolve_density("").is_none());
        assert!(resolve_density("  ").is_none());
        assert!(resolve_density("enormous").is_none());
    }

    #[test]
    fn test_display_prefers_alias() {
        assert_eq!(resolve_density("640").unwrap().to_string(), "xxxhdpi");
        assert_eq!(resolve_density("560").unwrap().to_string(), "560");
    }
}
