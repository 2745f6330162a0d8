//! Candidate solutions and the dominance relation

use serde::{Deserialize, Serialize};

/// Sentinel for score/fitness of a solution the server has not evaluated yet
pub const UNEVALUATED: f32 = -1e30;

/// Information about a candidate solution.
///
/// `fitness` (higher is better) and `complexity` (lower is better) drive the
/// dominance relation; `score` is a separate ranking value used only to order
/// the displayed frontier. Value semantics throughout: solutions are copied,
/// never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionInfo {
    /// Text representation of the solution
    pub text: String,
    /// Score, related to fitness, for ranking solutions
    pub score: f32,
    /// Fitness value of the solution
    pub fitness: f32,
    /// Complexity of the solution
    pub complexity: f32,
    /// Genotypic age of the solution
    pub age: u32,
}

impl SolutionInfo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            score: UNEVALUATED,
            fitness: UNEVALUATED,
            complexity: 0.0,
            age: 0,
        }
    }

    /// Tests if this solution dominates another in fitness and complexity:
    /// at least as fit and strictly simpler, or strictly fitter and at most
    /// as complex.
    pub fn dominates(&self, other: &SolutionInfo) -> bool {
        (self.fitness >= other.fitness && self.complexity < other.complexity)
            || (self.fitness > other.fitness && self.complexity <= other.complexity)
    }

    /// Tests if this solution occupies the same fitness/complexity point
    pub fn matches(&self, other: &SolutionInfo) -> bool {
        self.fitness == other.fitness && self.complexity == other.complexity
    }
}

impl Default for SolutionInfo {
    fn default() -> Self {
        Self::new("")
    }
}

impl std::fmt::Display for SolutionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
