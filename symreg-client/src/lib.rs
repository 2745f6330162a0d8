//! symreg-client: Synchronous client for a symreg search server
//!
//! Provides a blocking TCP connection with message framing and the command
//! set understood by the server: sending data and options, controlling the
//! search, and querying progress, individuals, and the solution frontier.
//!
//! ```no_run
//! use symreg_client::Connection;
//! use symreg_protocol::{SolutionFrontier, DEFAULT_PORT};
//!
//! # fn main() -> symreg_utils::Result<()> {
//! let mut conn = Connection::new();
//! conn.connect("127.0.0.1", DEFAULT_PORT)?;
//! conn.start_search()?;
//!
//! let mut best = SolutionFrontier::new();
//! let progress = conn.query_progress()?;
//! best.add(progress.solution);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod connection;

pub use connection::{Connection, ConnectionState};
