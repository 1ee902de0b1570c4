//! Console connection and command exchange
//!
//! Each command opens a fresh connection, drains the banner up to its
//! closing "OK", sends the command line, and reads until the next
//! "OK"/"KO" marker. The whole exchange shares one absolute deadline,
//! so a chatty banner cannot extend the total time budget.

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Instant};
use tracing::debug;

/// Default budget for a full command exchange.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(120_000);

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Connection refused: {0}")]
    Refused(String),
    #[error("Command rejected: {0}")]
    Rejected(String),
    #[error("Console exchange timed out")]
    Timeout,
    #[error("Connection lost: {0}")]
    ConnectionLost(String),
    #[error("Snapshot name must not be blank")]
    EmptySnapshotName,
}

/// Client for one emulator's console endpoint.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    host: String,
    port: u16,
    timeout: Duration,
}

impl ConsoleClient {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Send one command and wait for its "OK"/"KO" outcome.
    pub async fn send_command(&self, command: &str) -> Result<(), ConsoleError> {
        let deadline = Instant::now() + self.timeout;
        let addr = format!("{}:{}", self.host, self.port);
        debug!("Connecting to emulator console at {}", addr);

        let stream = timeout_at(deadline, TcpStream::connect(&addr))
            .await
            .map_err(|_| ConsoleError::Timeout)?
            .map_err(|e| ConsoleError::Refused(format!("{}: {}", addr, e)))?;

        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);

        // Banner ends with its own OK line.
        read_until_marker(&mut reader, deadline).await?;

        debug!("Sending console command: {}", command);
        let mut line = command.as_bytes().to_vec();
        line.push(b'\n');
        timeout_at(deadline, write_half.write_all(&line))
            .await
            .map_err(|_| ConsoleError::Timeout)?
            .map_err(|e| ConsoleError::ConnectionLost(e.to_string()))?;
        timeout_at(deadline, write_half.flush())
            .await
            .map_err(|_| ConsoleError::Timeout)?
            .map_err(|e| ConsoleError::ConnectionLost(e.to_string()))?;

        read_until_marker(&mut reader, deadline).await
    }
}

/// Read lines until an "OK" or "KO" marker, under the shared deadline.
async fn read_until_marker<R>(reader: &mut BufReader<R>, deadline: Instant) -> Result<(), ConsoleError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    loop {
        let mut line = String::new();
        let read = timeout_at(deadline, reader.read_line(&mut line))
            .await
            .map_err(|_| ConsoleError::Timeout)?
            .map_err(|e| ConsoleError::ConnectionLost(e.to_string()))?;
        if read == 0 {
            return Err(ConsoleError::ConnectionLost(
                "console closed before marker".to_string(),
            ));
        }

        let line = line.trim_end();
        if line == "OK" {
            return Ok(());
        }
        if let Some(rest) = line.strip_prefix("KO") {
            let message = rest.trim_start_matches(':').trim();
            return Err(ConsoleError::Rejected(message.to_string()));
        }
        debug!("console: {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    async fn local_listener() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    #[tokio::test]
    async fn test_successful_exchange() {
        let (listener, port) = local_listener().await;

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(b"Android Console: type 'help' for a list of commands\r\nOK\r\n")
                .await
                .unwrap();

            let mut buf = vec![0u8; 256];
            let n = socket.read(&mut buf).await.unwrap();
            let received = String::from_utf8_lossy(&buf[..n]).to_string();
            socket.write_all(b"OK\r\n").await.unwrap();
            received
        });

        let client = ConsoleClient::new("127.0.0.1", port);
        client.send_command("avd snapshot save jenkins").await.unwrap();

        let received = server.await.unwrap();
        assert_eq!(received, "avd snapshot save jenkins\n");
    }

    #[tokio::test]
    async fn test_rejected_command() {
        let (listener, port) = local_listener().await;

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"Android Console\r\nOK\r\n").await.unwrap();

            let mut buf = vec![0u8; 256];
            let _ = socket.read(&mut buf).await.unwrap();
            socket
                .write_all(b"KO: snapshot not found\r\n")
                .await
                .unwrap();
        });

        let client = ConsoleClient::new("127.0.0.1", port);
        let err = client.send_command("avd snapshot load missing").await.unwrap_err();
        match err {
            ConsoleError::Rejected(message) => assert_eq!(message, "snapshot not found"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let (listener, port) = local_listener().await;

        tokio::spawn(async move {
            // Accept and hold the connection without ever writing.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client =
            ConsoleClient::new("127.0.0.1", port).with_timeout(Duration::from_millis(200));
        let err = client.send_command("avd snapshot save s").await.unwrap_err();
        assert!(matches!(err, ConsoleError::Timeout));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let (listener, port) = local_listener().await;
        drop(listener);

        let client = ConsoleClient::new("127.0.0.1", port);
        let err = client.send_command("help").await.unwrap_err();
        assert!(matches!(err, ConsoleError::Refused(_)));
    }

    #[tokio::test]
    async fn test_server_hangup_is_connection_lost() {
        let (listener, port) = local_listener().await;

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"Android Console\r\nOK\r\n").await.unwrap();

            let mut buf = vec![0u8; 256];
            let _ = socket.read(&mut buf).await.unwrap();
            // Drop without answering the command.
        });

        let client = ConsoleClient::new("127.0.0.1", port);
        let err = client.send_command("avd snapshot save s").await.unwrap_err();
        assert!(matches!(err, ConsoleError::ConnectionLost(_)));
    }
}
