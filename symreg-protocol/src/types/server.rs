//! Server system information

use serde::{Deserialize, Serialize};

/// System information reported by a search server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub hostname: String,
    pub operating_system: String,
    pub server_version: f64,
    pub cpu_cores: i32,
}

impl ServerInfo {
    /// Test if info is entered and in range
    pub fn is_valid(&self) -> bool {
        !self.hostname.is_empty()
            && !self.operating_system.is_empty()
            && self.server_version > 0.0
            && self.cpu_cores > 0
    }

    /// Short text summary of the server info
    pub fn summary(&self) -> String {
        let mut s = String::new();
        if !self.is_valid() {
            s.push_str("Invalid! ");
        }
        s.push_str(&format!(
            "{}, symreg {} ({}), {} CPU core{}",
            self.hostname,
            self.server_version,
            self.operating_system,
            self.cpu_cores,
            if self.cpu_cores == 1 { "" } else { "s" }
        ));
        s
    }
}
