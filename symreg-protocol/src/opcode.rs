//! Command opcodes for the search protocol

/// Integer tag identifying a requested server operation.
///
/// Confirm commands (1xx, 3xx) are answered with a status + message envelope;
/// query commands (2xx, 401) are answered with a single length-prefixed
/// payload and carry no status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Opcode {
    SendDataSet = 101,
    SendDataLocation = 102,
    SendOptions = 103,
    SendIndividuals = 104,
    QueryProgress = 201,
    QueryServerInfo = 202,
    QueryIndividuals = 203,
    QueryFrontier = 204,
    StartSearch = 301,
    PauseSearch = 302,
    EndSearch = 303,
    CalcSolutionInfo = 401,
}

/// Error for integer tags that do not name a known operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unknown opcode: {0}")]
pub struct UnknownOpcode(pub i32);

impl Opcode {
    /// The wire representation of this opcode
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Whether the server answers this command with a raw payload instead of
    /// a status + message envelope
    pub fn is_query(self) -> bool {
        matches!(
            self,
            Opcode::QueryProgress
                | Opcode::QueryServerInfo
                | Opcode::QueryIndividuals
                | Opcode::QueryFrontier
                | Opcode::CalcSolutionInfo
        )
    }
}

impl TryFrom<i32> for Opcode {
    type Error = UnknownOpcode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            101 => Ok(Opcode::SendDataSet),
            102 => Ok(Opcode::SendDataLocation),
            103 => Ok(Opcode::SendOptions),
            104 => Ok(Opcode::SendIndividuals),
            201 => Ok(Opcode::QueryProgress),
            202 => Ok(Opcode::QueryServerInfo),
            203 => Ok(Opcode::QueryIndividuals),
            204 => Ok(Opcode::QueryFrontier),
            301 => Ok(Opcode::StartSearch),
            302 => Ok(Opcode::PauseSearch),
            303 => Ok(Opcode::EndSearch),
            401 => Ok(Opcode::CalcSolutionInfo),
            other => Err(UnknownOpcode(other)),
        }
    }
}
