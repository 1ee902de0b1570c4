//! Version strings
//!
//! Parses and orders the dotted revision strings printed by the SDK tools,
//! including release-candidate qualifiers (e.g. "24.0.0 rc2").

use std::cmp::Ordering;
use std::fmt;

/// A parsed dotted version with an optional trailing qualifier.
///
/// Numeric components compare element-wise with shorter sequences
/// zero-padded. A version carrying a qualifier orders before the same
/// numbers without one: a release supersedes its own release candidates.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u32>,
    qualifier: Option<String>,
    known: bool,
}

impl Version {
    /// Parse a version string. Never fails: unparseable numeric components
    /// become 0, and blank input yields the distinct unknown version.
    pub fn parse(text: &str) -> Version {
        let text = text.trim();
        if text.is_empty() {
            return Version::unknown();
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let components = tokens[0]
            .split('.')
            .map(|c| c.parse::<u32>().unwrap_or(0))
            .collect();

        // A trailing token that is not purely numeric is the qualifier.
        let qualifier = tokens
            .last()
            .filter(|t| tokens.len() > 1 && !t.chars().all(|c| c.is_ascii_digit()))
            .map(|t| t.to_string());

        Version {
            components,
            qualifier,
            known: true,
        }
    }

    /// The version for missing or blank input. Compares below every known
    /// version with the same numbers, and never equals a parsed "0.0.0".
    pub fn unknown() -> Version {
        Version {
            components: Vec::new(),
            qualifier: None,
            known: false,
        }
    }

    /// Whether this version came from missing/blank input.
    pub fn is_unknown(&self) -> bool {
        !self.known
    }

    /// Numeric components, in order.
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// The trailing qualifier, if any (e.g. "rc1").
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        match (&self.qualifier, &other.qualifier) {
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Equal => self.known.cmp(&other.known),
                ord => ord,
            },
            (None, None) => self.known.cmp(&other.known),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.known {
            return write!(f, "unknown");
        }
        let joined = self
            .components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".");
        match &self.qualifier {
            Some(q) => write!(f, "{} {}", joined, q),
            None => write!(f, "{}", joined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let v = Version::parse("25.0.3");
        assert_eq!(v.components(), &[25, 0, 3]);
        assert_eq!(v.qualifier(), None);
        assert!(!v.is_unknown());
    }

    #[test]
    fn test_parse_qualifier() {
        let v = Version::parse("1.0.0 rc1");
        assert_eq!(v.components(), &[1, 0, 0]);
        assert_eq!(v.qualifier(), Some("rc1"));
    }

    #[test]
    fn test_unparseable_component_becomes_zero() {
        let v = Version::parse("1.x.3");
        assert_eq!(v.components(), &[1, 0, 3]);
    }

    #[test]
    fn test_blank_is_unknown_not_zero() {
        let unknown = Version::parse("  ");
        assert!(unknown.is_unknown());
        assert_ne!(unknown, Version::parse("0.0.0"));
        assert!(unknown < Version::parse("0.0.0"));
    }

    #[test]
    fn test_compare_equal_to_self() {
        for text in ["1.0.0", "1.0.0 rc1", "2", ""] {
            let v = Version::parse(text);
            assert_eq!(v.cmp(&v), Ordering::Equal);
        }
    }

    #[test]
    fn test_release_supersedes_candidate() {
        let rc = Version::parse("1.0.0 rc1");
        let release = Version::parse("1.0.0");
        assert!(rc < release);
        assert_ne!(rc, release);
    }

    #[test]
    fn test_qualifiers_break_ties_lexicographically() {
        assert!(Version::parse("1.0.0 rc1") < Version::parse("1.0.0 rc2"));
    }

    #[test]
    fn test_shorter_sequence_zero_padded() {
        assert_eq!(Version::parse("1.0"), Version::parse("1.0.0"));
        assert!(Version::parse("1.0") < Version::parse("1.0.1"));
        assert!(Version::parse("1.10") > Version::parse("1.9.5"));
    }

    #[test]
    fn test_display_round_trip_preserves_ordering() {
        for text in ["1.0.0", "1.0.0 rc1", "25.0.3", "4", "1.x.3"] {
            let v = Version::parse(text);
            assert_eq!(Version::parse(&v.to_string()), v);
        }
    }
}
