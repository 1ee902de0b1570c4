//! Snapshot save/load over the console
//!
//! Thin wrappers that render `avd snapshot` command lines and validate
//! the snapshot name before opening a connection.

use tracing::info;

use crate::console::{ConsoleClient, ConsoleError};

/// A snapshot operation addressed to a named snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotCommand {
    Save(String),
    Load(String),
}

impl SnapshotCommand {
    pub fn name(&self) -> &str {
        match self {
            SnapshotCommand::Save(name) | SnapshotCommand::Load(name) => name,
        }
    }

    /// The console command line for this operation.
    pub fn command_line(&self) -> String {
        match self {
            SnapshotCommand::Save(name) => format!("avd snapshot save {}", name),
            SnapshotCommand::Load(name) => format!("avd snapshot load {}", name),
        }
    }
}

async fn run(client: &ConsoleClient, command: SnapshotCommand) -> Result<(), ConsoleError> {
    if command.name().trim().is_empty() {
        return Err(ConsoleError::EmptySnapshotName);
    }
    client.send_command(&command.command_line()).await
}

/// Persist the emulator's current state under `name`.
pub async fn save_snapshot(client: &ConsoleClient, name: &str) -> Result<(), ConsoleError> {
    run(client, SnapshotCommand::Save(name.to_string())).await?;
    info!("Saved snapshot '{}' on {}:{}", name, client.host(), client.port());
    Ok(())
}

/// Restore the emulator to the state saved under `name`.
pub async fn load_snapshot(client: &ConsoleClient, name: &str) -> Result<(), ConsoleError> {
    run(client, SnapshotCommand::Load(name.to_string())).await?;
    info!("Loaded snapshot '{}' on {}:{}", name, client.host(), client.port());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lines() {
        assert_eq!(
            SnapshotCommand::Save("jenkins".to_string()).command_line(),
            "avd snapshot save jenkins"
        );
        assert_eq!(
            SnapshotCommand::Load("clean-boot".to_string()).command_line(),
            "avd snapshot load clean-boot"
        );
    }

    #[tokio::test]
    async fn test_blank_name_rejected_without_connecting() {
        // Port 1 is never listening; a connection attempt would fail
        // with Refused, so EmptySnapshotName proves we bailed first.
        let client = ConsoleClient::new("127.0.0.1", 1);
        let err = save_snapshot(&client, "  ").await.unwrap_err();
        assert!(matches!(err, ConsoleError::EmptySnapshotName));

        let err = load_snapshot(&client, "").await.unwrap_err();
        assert!(matches!(err, ConsoleError::EmptySnapshotName));
    }
}
