//! Blocking transport session with a search server
//!
//! One [`Connection`] owns one TCP socket. Every exchange is a complete,
//! blocking request/response round-trip; there is no pipelining and no
//! internal timeout unless one is set with
//! [`set_io_timeout`](Connection::set_io_timeout). Any I/O or framing error
//! closes the socket before the failing call returns, so after an error the
//! session is always back in the disconnected state.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use symreg_protocol::codec::{self, PacketDecoder, ResponseDecoder};
use symreg_protocol::{CommandResult, Opcode};
use symreg_utils::{Result, SymregError};

const READ_CHUNK: usize = 4096;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Synchronous network session with a search server
pub struct Connection {
    stream: Option<TcpStream>,
    read_buf: BytesMut,
    last_result: CommandResult,
    io_timeout: Option<Duration>,
}

impl Connection {
    /// Create a new connection (not yet connected)
    pub fn new() -> Self {
        Self {
            stream: None,
            read_buf: BytesMut::new(),
            last_result: CommandResult::default(),
            io_timeout: None,
        }
    }

    /// Get current connection state
    pub fn state(&self) -> ConnectionState {
        if self.stream.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// The most recent status + message received for a confirm-style
    /// exchange. Has no meaning after a pure query exchange.
    pub fn last_result(&self) -> &CommandResult {
        &self.last_result
    }

    /// Set a read/write deadline applied to the current and any future
    /// socket. `None` (the default) blocks indefinitely.
    pub fn set_io_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.io_timeout = timeout;
        if let Some(stream) = &self.stream {
            stream.set_read_timeout(timeout)?;
            stream.set_write_timeout(timeout)?;
        }
        Ok(())
    }

    /// Open a connection to a search server and read its greeting.
    ///
    /// The host is resolved and each address tried in order. On success the
    /// server immediately sends one confirm envelope; it is stored as the
    /// last result and returned. Resolution failure, refusal by every
    /// address, or a failed greeting read all leave the session
    /// disconnected.
    pub fn connect(&mut self, host: &str, port: u16) -> Result<CommandResult> {
        self.disconnect();

        let addrs = (host, port).to_socket_addrs().map_err(|e| {
            SymregError::connection(format!("Failed to resolve {}:{}: {}", host, port, e))
        })?;

        let mut last_err: Option<std::io::Error> = None;
        let mut stream = None;
        for addr in addrs {
            tracing::debug!(%addr, "attempting connection");
            match TcpStream::connect(addr) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => last_err = Some(e),
            }
        }

        let stream = stream.ok_or_else(|| match last_err {
            Some(e) => {
                SymregError::connection(format!("Failed to connect to {}:{}: {}", host, port, e))
            }
            None => SymregError::connection(format!("No addresses resolved for {}:{}", host, port)),
        })?;
        stream.set_read_timeout(self.io_timeout)?;
        stream.set_write_timeout(self.io_timeout)?;
        self.stream = Some(stream);

        // the server greets every new connection with a confirm envelope
        let greeting = self.read_response()?;
        tracing::debug!(status = greeting.value, message = %greeting.message, "connected");
        Ok(greeting)
    }

    /// Close the connection. Idempotent.
    pub fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
            tracing::debug!("disconnected");
        }
        self.read_buf.clear();
    }

    /// Address of the connected server, if any
    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.stream.as_ref().and_then(|s| s.peer_addr().ok())
    }

    /// Short description of the connection
    pub fn summary(&self) -> String {
        match self.remote_addr() {
            Some(addr) => format!("Connected to {}", addr),
            None => "Disconnected".into(),
        }
    }

    // === request/response primitives used by the command dispatcher ===

    /// Write a no-argument request: `[opcode]`
    pub(crate) fn write_command(&mut self, opcode: Opcode) -> Result<()> {
        tracing::debug!(opcode = opcode.as_i32(), "sending command");
        let mut buf = BytesMut::with_capacity(4);
        codec::encode_command(&mut buf, opcode);
        self.write_all_bytes(&buf)
    }

    /// Write a fixed-argument request: `[opcode][value]`
    pub(crate) fn write_command_fixed(&mut self, opcode: Opcode, value: i32) -> Result<()> {
        tracing::debug!(opcode = opcode.as_i32(), value, "sending command");
        let mut buf = BytesMut::with_capacity(8);
        codec::encode_command_fixed(&mut buf, opcode, value);
        self.write_all_bytes(&buf)
    }

    /// Write a variable-payload request: `[opcode][length][payload]`
    pub(crate) fn write_command_packet(&mut self, opcode: Opcode, payload: &[u8]) -> Result<()> {
        tracing::debug!(
            opcode = opcode.as_i32(),
            bytes = payload.len(),
            "sending command packet"
        );
        let mut buf = BytesMut::with_capacity(8 + payload.len());
        // an oversized payload is rejected before any byte hits the wire;
        // nothing was exchanged, so this is a local error and the session
        // stays connected
        codec::encode_command_packet(&mut buf, opcode, payload)
            .map_err(|e| SymregError::internal(e.to_string()))?;
        self.write_all_bytes(&buf)
    }

    /// Block until one length-prefixed packet has been read
    pub(crate) fn read_packet(&mut self) -> Result<Bytes> {
        let mut decoder = PacketDecoder::new();
        loop {
            match decoder.decode(&mut self.read_buf) {
                Ok(Some(packet)) => return Ok(packet),
                Ok(None) => self.fill_read_buf()?,
                Err(e) => {
                    self.disconnect();
                    return Err(SymregError::protocol(e.to_string()));
                }
            }
        }
    }

    /// Block until one status + message envelope has been read; stores it as
    /// the last result
    pub(crate) fn read_response(&mut self) -> Result<CommandResult> {
        let mut decoder = ResponseDecoder::new();
        loop {
            match decoder.decode(&mut self.read_buf) {
                Ok(Some(result)) => {
                    if !result.is_success() {
                        tracing::warn!(status = result.value, message = %result.message,
                            "server rejected command");
                    }
                    self.last_result = result.clone();
                    return Ok(result);
                }
                Ok(None) => self.fill_read_buf()?,
                Err(e) => {
                    self.disconnect();
                    return Err(SymregError::protocol(e.to_string()));
                }
            }
        }
    }

    fn write_all_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(SymregError::NotConnected);
        };
        if let Err(e) = stream.write_all(bytes).and_then(|_| stream.flush()) {
            self.disconnect();
            return Err(e.into());
        }
        Ok(())
    }

    fn fill_read_buf(&mut self) -> Result<()> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(SymregError::NotConnected);
        };
        let mut chunk = [0u8; READ_CHUNK];
        match stream.read(&mut chunk) {
            Ok(0) => {
                self.disconnect();
                Err(SymregError::ConnectionClosed)
            }
            Ok(n) => {
                self.read_buf.extend_from_slice(&chunk[..n]);
                Ok(())
            }
            Err(e) => {
                self.disconnect();
                Err(e.into())
            }
        }
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("state", &self.state())
            .field("remote_addr", &self.remote_addr())
            .field("last_result", &self.last_result)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{confirm_frame, spawn_server};

    #[test]
    fn test_initial_state() {
        let conn = Connection::new();
        assert_eq!(conn.state(), ConnectionState::Disconnected);
        assert!(!conn.is_connected());
        assert!(conn.last_result().is_success());
        assert_eq!(conn.summary(), "Disconnected");
    }

    #[test]
    fn test_connect_reads_greeting() {
        let (port, handle) = spawn_server(|mut sock| {
            sock.write_all(&confirm_frame(0, "welcome")).unwrap();
        });

        let mut conn = Connection::new();
        let greeting = conn.connect("127.0.0.1", port).unwrap();
        assert!(greeting.is_success());
        assert_eq!(greeting.message, "welcome");
        assert_eq!(conn.last_result(), &greeting);
        assert!(conn.is_connected());
        assert!(conn.summary().starts_with("Connected to 127.0.0.1"));

        drop(conn);
        handle.join().unwrap();
    }

    #[test]
    fn test_connect_refused() {
        // bind then drop to get a port with no listener
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let mut conn = Connection::new();
        let err = conn.connect("127.0.0.1", port).unwrap_err();
        assert!(matches!(err, SymregError::Connection(_)));
        assert!(!conn.is_connected());
    }

    #[test]
    fn test_connect_resolution_failure() {
        let mut conn = Connection::new();
        let err = conn.connect("host.invalid.", 22112).unwrap_err();
        assert!(matches!(err, SymregError::Connection(_)));
        assert!(!conn.is_connected());
    }

    #[test]
    fn test_connect_fails_when_greeting_missing() {
        let (port, handle) = spawn_server(|sock| {
            // close without greeting
            drop(sock);
        });

        let mut conn = Connection::new();
        let err = conn.connect("127.0.0.1", port).unwrap_err();
        assert!(matches!(err, SymregError::ConnectionClosed));
        assert!(!conn.is_connected());
        handle.join().unwrap();
    }

    #[test]
    fn test_disconnect_idempotent() {
        let mut conn = Connection::new();
        conn.disconnect();
        conn.disconnect();
        assert_eq!(conn.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_write_when_disconnected() {
        let mut conn = Connection::new();
        let err = conn.write_command(Opcode::StartSearch).unwrap_err();
        assert!(matches!(err, SymregError::NotConnected));
    }

    #[test]
    fn test_oversized_payload_is_local_error_and_keeps_connection() {
        let (port, handle) = spawn_server(|mut sock| {
            sock.write_all(&confirm_frame(0, "welcome")).unwrap();
            // nothing must arrive for the rejected command
            let mut buf = [0u8; 16];
            assert_eq!(sock.read(&mut buf).unwrap(), 0);
        });

        let mut conn = Connection::new();
        conn.connect("127.0.0.1", port).unwrap();

        let payload = vec![0u8; symreg_protocol::MAX_PACKET_SIZE + 1];
        let err = conn
            .write_command_packet(Opcode::SendDataSet, &payload)
            .unwrap_err();
        assert!(matches!(err, SymregError::Internal(_)));
        assert!(!err.is_disconnecting());
        assert!(conn.is_connected());

        drop(conn);
        handle.join().unwrap();
    }

    #[test]
    fn test_set_io_timeout_before_connect() {
        let mut conn = Connection::new();
        conn.set_io_timeout(Some(Duration::from_secs(5))).unwrap();
        assert!(!conn.is_connected());
    }

    #[test]
    fn test_io_timeout_expires() {
        let (port, handle) = spawn_server(|mut sock| {
            sock.write_all(&confirm_frame(0, "hi")).unwrap();
            // then go silent until the client gives up
            let mut buf = [0u8; 16];
            let _ = sock.read(&mut buf);
        });

        let mut conn = Connection::new();
        conn.set_io_timeout(Some(Duration::from_millis(50))).unwrap();
        conn.connect("127.0.0.1", port).unwrap();

        let err = conn.read_packet().unwrap_err();
        assert!(matches!(err, SymregError::Io(_)));
        assert!(!conn.is_connected());
        handle.join().unwrap();
    }
}
