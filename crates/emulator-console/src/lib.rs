//! Emulator Console Client
//!
//! Talks the emulator's telnet-style console protocol over TCP: one
//! command per connection, responses terminated by "OK" or "KO" marker
//! lines, everything bounded by a single absolute deadline.

pub mod console;
pub mod snapshot;

pub use console::{ConsoleClient, ConsoleError, DEFAULT_COMMAND_TIMEOUT};
pub use snapshot::{load_snapshot, save_snapshot, SnapshotCommand};

/// Console port of the first emulator instance.
pub const DEFAULT_CONSOLE_PORT: u16 = 5554;
