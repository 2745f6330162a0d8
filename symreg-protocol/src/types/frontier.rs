//! Pareto frontier over candidate solutions

use std::cmp::Ordering;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::solution::SolutionInfo;

/// Container tracking the non-dominated set of best-known solutions.
///
/// Invariant: no member dominates or exactly matches another member. Members
/// are kept sorted descending by `score`, ties broken by ascending
/// `complexity`; the frontier never mutates `score` itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolutionFrontier {
    front: Vec<SolutionInfo>,
}

impl SolutionFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a solution to the frontier if non-dominated, removing any
    /// existing members the new solution dominates. Returns whether the
    /// frontier changed.
    pub fn add(&mut self, soln: SolutionInfo) -> bool {
        if !self.test(&soln) {
            return false;
        }

        self.front.retain(|member| !soln.dominates(member));
        self.front.push(soln);
        self.front.sort_by(by_descending_score);
        true
    }

    /// Tests if a solution is non-dominated by, and distinct from, every
    /// current member. Does not mutate the frontier.
    pub fn test(&self, soln: &SolutionInfo) -> bool {
        !self
            .front
            .iter()
            .any(|member| member.dominates(soln) || member.matches(soln))
    }

    pub fn len(&self) -> usize {
        self.front.len()
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&SolutionInfo> {
        self.front.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SolutionInfo> {
        self.front.iter()
    }

    /// Removes the member at `i`. Shrinking a non-dominated set cannot
    /// violate the invariant, so no re-check is needed.
    pub fn remove(&mut self, i: usize) -> SolutionInfo {
        self.front.remove(i)
    }

    pub fn clear(&mut self) {
        self.front.clear();
    }
}

/// Descending by score, ties ascending by complexity. `total_cmp` keeps the
/// comparison a total order even if an unevaluated NaN score slips in.
fn by_descending_score(a: &SolutionInfo, b: &SolutionInfo) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.complexity.total_cmp(&b.complexity))
}

impl Index<usize> for SolutionFrontier {
    type Output = SolutionInfo;

    fn index(&self, i: usize) -> &SolutionInfo {
        &self.front[i]
    }
}

impl<'a> IntoIterator for &'a SolutionFrontier {
    type Item = &'a SolutionInfo;
    type IntoIter = std::slice::Iter<'a, SolutionInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.front.iter()
    }
}

impl std::fmt::Display for SolutionFrontier {
    /// Text table of the frontier. The displayed fitness is negated so it
    /// reads as an error magnitude (smaller is better).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Size:\tFitness:\tEquation:")?;
        writeln!(f, "-----\t--------\t---------")?;
        for soln in &self.front {
            writeln!(f, "{}\t{}\t{}", soln.complexity, -soln.fitness, soln.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(score: f32, fitness: f32, complexity: f32) -> SolutionInfo {
        SolutionInfo {
            score,
            fitness,
            complexity,
            ..SolutionInfo::new("f(x)")
        }
    }

    fn assert_non_dominated(frontier: &SolutionFrontier) {
        for (i, a) in frontier.iter().enumerate() {
            for (j, b) in frontier.iter().enumerate() {
                if i != j {
                    assert!(!a.dominates(b), "{a:?} dominates {b:?}");
                    assert!(!a.matches(b), "{a:?} matches {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_add_to_empty() {
        let mut frontier = SolutionFrontier::new();
        assert!(frontier.add(solution(1.0, -1.0, 2.0)));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_dominated_candidate_rejected_without_change() {
        let mut frontier = SolutionFrontier::new();
        assert!(frontier.add(solution(1.0, 2.0, 1.0)));

        // worse fitness at higher complexity
        assert!(!frontier.add(solution(9.0, 1.0, 3.0)));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier[0].fitness, 2.0);
    }

    #[test]
    fn test_matching_candidate_rejected() {
        let mut frontier = SolutionFrontier::new();
        assert!(frontier.add(solution(1.0, 2.0, 1.0)));
        assert!(!frontier.add(solution(5.0, 2.0, 1.0)));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_dominating_candidate_removes_dominated() {
        let mut frontier = SolutionFrontier::new();
        assert!(frontier.add(solution(1.0, 1.0, 2.0)));
        assert!(frontier.add(solution(1.0, 0.0, 1.0)));
        assert_eq!(frontier.len(), 2);

        // dominates both members
        let before = frontier.len();
        assert!(frontier.add(solution(1.0, 2.0, 1.0)));
        assert_eq!(frontier.len(), before - 2 + 1);
        assert_non_dominated(&frontier);
    }

    #[test]
    fn test_tradeoff_points_coexist() {
        let mut frontier = SolutionFrontier::new();
        assert!(frontier.add(solution(1.0, 3.0, 5.0)));
        assert!(frontier.add(solution(1.0, 2.0, 3.0)));
        assert!(frontier.add(solution(1.0, 1.0, 1.0)));
        assert_eq!(frontier.len(), 3);
        assert_non_dominated(&frontier);
    }

    #[test]
    fn test_non_domination_invariant_under_add_sequence() {
        let mut frontier = SolutionFrontier::new();
        let candidates = [
            solution(5.0, -1.0, 2.0),
            solution(7.0, -2.0, 1.0),
            solution(3.0, 0.5, 4.0),
            solution(2.0, 0.5, 4.0),
            solution(8.0, 0.6, 3.0),
            solution(1.0, -5.0, 0.5),
            solution(4.0, 0.7, 2.5),
        ];
        for candidate in candidates {
            frontier.add(candidate);
            assert_non_dominated(&frontier);
        }
    }

    #[test]
    fn test_sort_order_descending_score() {
        // third point: equal fitness to the second, higher complexity, so the
        // second dominates it and it is rejected
        let mut frontier = SolutionFrontier::new();
        assert!(frontier.add(solution(5.0, -1.0, 2.0)));
        assert!(frontier.add(solution(7.0, -2.0, 1.0)));
        assert!(!frontier.add(solution(7.0, -2.0, 3.0)));

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier[0].score, 7.0);
        assert_eq!(frontier[1].score, 5.0);
    }

    #[test]
    fn test_equal_scores_ordered_by_ascending_complexity() {
        // a genuine trade-off so both members coexist
        let mut frontier = SolutionFrontier::new();
        assert!(frontier.add(solution(1.0, 2.0, 4.0)));
        assert!(frontier.add(solution(1.0, 1.0, 2.0)));
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier[0].complexity, 2.0);
        assert_eq!(frontier[1].complexity, 4.0);
    }

    #[test]
    fn test_nan_score_does_not_break_ordering() {
        let mut frontier = SolutionFrontier::new();
        assert!(frontier.add(solution(f32::NAN, 1.0, 2.0)));
        assert!(frontier.add(solution(2.0, 0.5, 1.0)));
        assert!(frontier.add(solution(1.0, 0.8, 1.5)));

        // total_cmp orders positive NaN above every finite score, so it
        // sorts first in descending order; the point is determinism, not
        // where NaN lands
        assert_eq!(frontier.len(), 3);
        assert!(frontier[0].score.is_nan());
        assert_eq!(frontier[1].score, 2.0);
        assert_eq!(frontier[2].score, 1.0);
    }

    #[test]
    fn test_score_never_mutated() {
        let mut frontier = SolutionFrontier::new();
        frontier.add(solution(42.0, 1.0, 1.0));
        assert_eq!(frontier[0].score, 42.0);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut frontier = SolutionFrontier::new();
        frontier.add(solution(1.0, 1.0, 2.0));
        frontier.add(solution(2.0, 2.0, 3.0));

        let removed = frontier.remove(0);
        assert_eq!(removed.score, 2.0);
        assert_eq!(frontier.len(), 1);

        frontier.clear();
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_display_negates_fitness() {
        let mut frontier = SolutionFrontier::new();
        let mut soln = solution(1.0, -2.5, 3.0);
        soln.text = "x*x".into();
        frontier.add(soln);

        let table = frontier.to_string();
        assert!(table.starts_with("Size:\tFitness:\tEquation:\n"));
        assert!(table.contains("3\t2.5\tx*x"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut frontier = SolutionFrontier::new();
        frontier.add(solution(1.0, 1.0, 2.0));

        let json = serde_json::to_string(&frontier).unwrap();
        let decoded: SolutionFrontier = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].score, 1.0);
    }
}
