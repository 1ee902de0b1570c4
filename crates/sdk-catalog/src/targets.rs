//! `avdmanager list target` output parsing
//!
//! The target list is block-structured: each record opens with an "id:"
//! line and carries labelled fields on the following lines. Malformed
//! blocks are skipped and counted, never fatal.

use tracing::warn;

/// What kind of SDK target a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A plain platform release
    Platform,
    /// A vendor add-on target
    AddOn,
}

/// One target record from `avdmanager list target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Quoted id ("android-21") when present, else the numeric index
    pub id: String,
    /// Display name ("Android API 21")
    pub name: String,
    pub kind: TargetKind,
    pub api_level: i32,
    pub revision: u32,
}

/// Result of a target-list parse: the usable records plus a count of
/// blocks that were dropped for missing fields.
#[derive(Debug, Default)]
pub struct TargetParse {
    pub targets: Vec<Target>,
    pub skipped: usize,
}

#[derive(Default)]
struct Block {
    id: Option<String>,
    name: Option<String>,
    kind: Option<TargetKind>,
    api_level: Option<i32>,
    revision: Option<u32>,
}

impl Block {
    fn finish(self, out: &mut TargetParse) {
        match (self.id, self.name, self.api_level, self.revision) {
            (Some(id), Some(name), Some(api_level), Some(revision)) => {
                out.targets.push(Target {
                    id,
                    name,
                    kind: self.kind.unwrap_or(TargetKind::Platform),
                    api_level,
                    revision,
                });
            }
            (id, _, _, _) => {
                warn!(
                    "Skipping incomplete target block{}",
                    id.map(|i| format!(" (id {})", i)).unwrap_or_default()
                );
                out.skipped += 1;
            }
        }
    }
}

/// Extract the id from an id line like `id: 1 or "android-21"`.
///
/// The quoted name is the canonical id; the numeric index is the
/// fallback when no quoted part is present.
fn parse_id(value: &str) -> Option<String> {
    if let Some(start) = value.find('"') {
        let rest = &value[start + 1..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }
    value.split_whitespace().next().map(|t| t.to_string())
}

/// Parse `avdmanager list target` output into typed records.
///
/// Lines outside any block and unrecognized labels are ignored. A block
/// missing any of id, name, API level, or revision is counted in
/// `skipped` rather than aborting the parse.
pub fn parse_target_list(output: &str) -> TargetParse {
    let mut result = TargetParse::default();
    let mut current: Option<Block> = None;

    for line in output.lines() {
        let line = line.trim();

        if let Some(value) = line.strip_prefix("id:") {
            if let Some(block) = current.take() {
                block.finish(&mut result);
            }
            let mut block = Block::default();
            block.id = parse_id(value.trim());
            current = Some(block);
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };

        if let Some(value) = line.strip_prefix("Name:") {
            block.name = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("Type:") {
            let value = value.trim().to_lowercase();
            block.kind = Some(if value.contains("add") {
                TargetKind::AddOn
            } else {
                TargetKind::Platform
            });
        } else if let Some(value) = line
            .strip_prefix("API level:")
            .or_else(|| line.strip_prefix("API Level:"))
        {
            block.api_level = value.trim().parse().ok();
        } else if let Some(value) = line.strip_prefix("Revision:") {
            block.revision = value.trim().parse().ok();
        }
    }

    if let Some(block) = current.take() {
        block.finish(&mut result);
    }

    result
}
