//! symreg-protocol: Wire-level definitions for the symreg search protocol
//!
//! This crate defines everything a peer needs to talk to a symbolic-regression
//! search server: command opcodes, the framed binary envelope, structured
//! payload encoding, and the domain types carried inside payloads (data sets,
//! search options, solutions, the Pareto frontier, progress and server info).
//!
//! All wire integers are 32-bit little-endian.

pub mod codec;
pub mod opcode;
pub mod payload;
pub mod result;
pub mod types;

// Re-export main types at crate root
pub use codec::{CodecError, PacketDecoder, ResponseDecoder, MAX_PACKET_SIZE};
pub use opcode::{Opcode, UnknownOpcode};
pub use result::{CommandResult, RESULT_ERROR, RESULT_SUCCESS};
pub use types::{
    DataSet, DataSetError, SearchOptions, SearchProgress, ServerInfo, SolutionFrontier,
    SolutionInfo,
};

/// Default TCP port of a symreg search server
pub const DEFAULT_PORT: u16 = 22112;

/// Multicast discovery port. Reserved by the wire protocol; no exposed
/// operation uses it.
pub const DEFAULT_MULTICAST_PORT: u16 = 30002;
