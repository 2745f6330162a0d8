//! Command results returned by confirm-style exchanges

use serde::{Deserialize, Serialize};

/// Status code for a successful command
pub const RESULT_SUCCESS: i32 = 0;
/// Status code for a rejected command
pub const RESULT_ERROR: i32 = 1;

/// Status and message sent back from the server after confirm commands.
///
/// A non-zero status is an application-level rejection: the request reached
/// the server and was understood, but refused. It does not close the
/// connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub value: i32,
    pub message: String,
}

impl CommandResult {
    pub fn new(value: i32, message: impl Into<String>) -> Self {
        Self {
            value,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(RESULT_SUCCESS, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(RESULT_ERROR, message)
    }

    pub fn is_success(&self) -> bool {
        self.value == RESULT_SUCCESS
    }
}

impl Default for CommandResult {
    fn default() -> Self {
        Self::success("")
    }
}

impl std::fmt::Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
