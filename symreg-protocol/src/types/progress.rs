//! Search progress reports

use serde::{Deserialize, Serialize};

use super::solution::SolutionInfo;

/// Snapshot of the server's search state.
///
/// Each report carries one solution recently added to the server's own
/// frontier; polling callers feed these into a local
/// [`SolutionFrontier`](super::SolutionFrontier) to accumulate the best set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchProgress {
    /// A solution recently added to the server's solution frontier
    pub solution: SolutionInfo,
    /// Total generations completed
    pub generations: f32,
    pub generations_per_sec: f32,
    /// Total times any equation was evaluated
    pub evaluations: f32,
    pub evaluations_per_sec: f32,
    /// Number of individuals in the current population
    pub total_population_size: i32,
}

impl SearchProgress {
    /// Tests if fields are entered and in range
    pub fn is_valid(&self) -> bool {
        self.generations >= 0.0
            && self.generations_per_sec >= 0.0
            && self.evaluations >= 0.0
            && self.evaluations_per_sec >= 0.0
            && self.total_population_size >= 0
    }

    /// Short text summary of the search progress
    pub fn summary(&self) -> String {
        let mut s = String::new();
        if !self.is_valid() {
            s.push_str("Invalid! ");
        }
        s.push_str(&format!(
            "{} generations, {} evaluations",
            self.generations, self.evaluations
        ));
        s
    }
}
