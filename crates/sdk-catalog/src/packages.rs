//! `sdkmanager --list` output parsing
//!
//! The package list is sectioned by headers ("Installed packages:",
//! "Available Packages:", "Available Updates:") with pipe-separated
//! table rows under each. Rows that cannot be placed or parsed are
//! dropped and counted.

use tracing::warn;

use crate::version::Version;

/// Which section of the listing a package came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageCategory {
    Installed,
    Available,
    Update,
}

/// One row of the package listing.
#[derive(Debug, Clone)]
pub struct SdkPackage {
    /// Package path ("platforms;android-34")
    pub id: String,
    pub version: Version,
    pub category: PackageCategory,
    /// Third table cell; description for installed/available rows, the
    /// available version for update rows
    pub description: String,
}

/// The full parsed listing, split by section.
#[derive(Debug, Default)]
pub struct Catalog {
    pub installed: Vec<SdkPackage>,
    pub available: Vec<SdkPackage>,
    pub updates: Vec<SdkPackage>,
    /// Rows that had no active section or too few cells
    pub dropped: usize,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty() && self.available.is_empty() && self.updates.is_empty()
    }

    /// All packages ordered by id, then newest version first within an id.
    pub fn sorted(&self) -> Vec<&SdkPackage> {
        let mut all: Vec<&SdkPackage> = self
            .installed
            .iter()
            .chain(self.available.iter())
            .chain(self.updates.iter())
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| b.version.cmp(&a.version)));
        all
    }
}

fn section_for(line: &str) -> Option<PackageCategory> {
    match line {
        "Installed packages:" => Some(PackageCategory::Installed),
        "Available Packages:" | "Available packages:" => Some(PackageCategory::Available),
        "Available Updates:" | "Available updates:" => Some(PackageCategory::Update),
        _ => None,
    }
}

fn is_chrome(first_cell: &str) -> bool {
    first_cell.starts_with("---")
        || first_cell.starts_with("Path")
        || first_cell.starts_with("ID")
}

/// Parse `sdkmanager --list` output into a [`Catalog`].
///
/// Section headers switch the active category; an unrecognized header
/// line clears it, so rows under headers this parser does not know are
/// dropped rather than misfiled. Separator and column-header rows are
/// silently ignored.
pub fn parse_package_list(output: &str) -> Catalog {
    let mut catalog = Catalog::default();
    let mut section: Option<PackageCategory> = None;

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(category) = section_for(line) {
            section = Some(category);
            continue;
        }
        if line.ends_with(':') && !line.contains('|') {
            section = None;
            continue;
        }

        if !line.contains('|') {
            continue;
        }

        let parts: Vec<&str> = line.split('|').map(|s| s.trim()).collect();
        if is_chrome(parts[0]) {
            continue;
        }

        let Some(category) = section else {
            warn!("Dropping package row outside any section: {}", line);
            catalog.dropped += 1;
            continue;
        };

        if parts.len() < 3 || parts[0].is_empty() {
            warn!("Dropping malformed package row: {}", line);
            catalog.dropped += 1;
            continue;
        }

        let package = SdkPackage {
            id: parts[0].to_string(),
            version: Version::parse(parts[1]),
            category,
            description: parts[2].to_string(),
        };

        match category {
            PackageCategory::Installed => catalog.installed.push(package),
            PackageCategory::Available => catalog.available.push(package),
            PackageCategory::Update => catalog.updates.push(package),
        }
    }

    catalog
}
