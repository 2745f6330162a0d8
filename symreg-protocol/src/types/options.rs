//! Search options sent to the server

use serde::{Deserialize, Serialize};

/// Identifiers for the fitness metrics
pub mod fitness {
    pub const ABSOLUTE_ERROR: i32 = 0;
    pub const SQUARED_ERROR: i32 = 1;
    pub const ROOT_SQUARED_ERROR: i32 = 2;
    pub const LOGARITHMIC_ERROR: i32 = 3;
    pub const EXPLOG_ERROR: i32 = 4;
    pub const CORRELATION: i32 = 5;
    pub const MINIMIZE_DIFFERENCE: i32 = 6;
    pub const AKAIKE_INFORMATION: i32 = 7;
    pub const BAYESIAN_INFORMATION: i32 = 8;
    pub const MAXIMUM_ERROR: i32 = 9;
    pub const MEDIAN_ERROR: i32 = 10;
    pub const IMPLICIT_ERROR: i32 = 11;
    pub const SLOPE_ERROR: i32 = 12;
    pub const COUNT: i32 = 13;

    /// Human-readable name of a fitness metric
    pub fn name(metric: i32) -> &'static str {
        match metric {
            ABSOLUTE_ERROR => "Absolute Error",
            SQUARED_ERROR => "Squared Error",
            ROOT_SQUARED_ERROR => "Root Squared Error",
            LOGARITHMIC_ERROR => "Logarithmic Error",
            EXPLOG_ERROR => "Exponential Logarithmic Error",
            CORRELATION => "Correlation Coefficient",
            MINIMIZE_DIFFERENCE => "Minimize the Difference",
            AKAIKE_INFORMATION => "Akaike Information Criterion",
            BAYESIAN_INFORMATION => "Bayesian Information Criterion",
            MAXIMUM_ERROR => "Maximum Error",
            MEDIAN_ERROR => "Median Error",
            IMPLICIT_ERROR => "Implicit Derivative Error",
            SLOPE_ERROR => "Slope Error",
            _ => "Unknown?",
        }
    }
}

/// Options controlling a search, validated client-side before sending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Target relationship to search for, e.g. `"y = f(x)"`
    pub search_relationship: String,
    /// Building-block expressions the search may compose
    pub building_blocks: Vec<String>,
    pub normalize_fitness_by: f32,
    /// One of the [`fitness`] identifiers
    pub fitness_metric: i32,
    pub solution_population_size: i32,
    pub predictor_population_size: i32,
    pub trainer_population_size: i32,
    pub solution_crossover_probability: f32,
    pub solution_mutation_probability: f32,
    pub predictor_crossover_probability: f32,
    pub predictor_mutation_probability: f32,
    /// Required when `fitness_metric` is [`fitness::IMPLICIT_ERROR`]
    pub implicit_derivative_dependencies: String,
}

impl SearchOptions {
    /// Options with default parameters for the given relationship
    pub fn new(search_relationship: impl Into<String>) -> Self {
        let mut options = Self {
            search_relationship: search_relationship.into(),
            building_blocks: Vec::new(),
            normalize_fitness_by: 1.0,
            fitness_metric: fitness::ABSOLUTE_ERROR,
            solution_population_size: 64,
            predictor_population_size: 8,
            trainer_population_size: 8,
            solution_crossover_probability: 0.7,
            solution_mutation_probability: 0.03,
            predictor_crossover_probability: 0.5,
            predictor_mutation_probability: 0.06,
            implicit_derivative_dependencies: String::new(),
        };
        options.set_default_building_blocks();
        options
    }

    /// Resets the building blocks to the default algebra plus sine/cosine
    pub fn set_default_building_blocks(&mut self) {
        self.building_blocks = [
            "1.23", // constants
            "a",    // variables
            "a+b",
            "a-b",
            "a*b",
            "a/b",
            "sin(a)",
            "cos(a)",
        ]
        .into_iter()
        .map(String::from)
        .collect();
    }

    /// Test if the options are entered and in range
    pub fn is_valid(&self) -> bool {
        let probability = 0.0..=1.0;
        !self.search_relationship.is_empty()
            && (0..fitness::COUNT).contains(&self.fitness_metric)
            && !self.building_blocks.is_empty()
            && self.solution_population_size >= 5
            && self.predictor_population_size >= 5
            && self.trainer_population_size >= 1
            && probability.contains(&self.solution_crossover_probability)
            && probability.contains(&self.solution_mutation_probability)
            && probability.contains(&self.predictor_crossover_probability)
            && probability.contains(&self.predictor_mutation_probability)
            && (self.fitness_metric != fitness::IMPLICIT_ERROR
                || !self.implicit_derivative_dependencies.is_empty())
    }

    /// Short text summary of the search options
    pub fn summary(&self) -> String {
        let mut s = String::new();
        if !self.is_valid() {
            s.push_str("Invalid! ");
        }
        s.push_str(&format!(
            "\"{}\", {} building-block types, {} fitness",
            self.search_relationship,
            self.building_blocks.len(),
            fitness::name(self.fitness_metric)
        ));
        s
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new("0=f(0)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SearchOptions::default().is_valid());
        assert!(SearchOptions::new("y = f(x)").is_valid());
    }

    #[test]
    fn test_default_parameters() {
        let options = SearchOptions::default();
        assert_eq!(options.search_relationship, "0=f(0)");
        assert_eq!(options.fitness_metric, fitness::ABSOLUTE_ERROR);
        assert_eq!(options.solution_population_size, 64);
        assert_eq!(options.predictor_population_size, 8);
        assert_eq!(options.trainer_population_size, 8);
        assert_eq!(options.building_blocks.len(), 8);
    }

    #[test]
    fn test_empty_relationship_invalid() {
        let options = SearchOptions::new("");
        assert!(!options.is_valid());
    }

    #[test]
    fn test_empty_building_blocks_invalid() {
        let mut options = SearchOptions::default();
        options.building_blocks.clear();
        assert!(!options.is_valid());
    }

    #[test]
    fn test_fitness_metric_out_of_range() {
        let mut options = SearchOptions::default();
        options.fitness_metric = fitness::COUNT;
        assert!(!options.is_valid());
        options.fitness_metric = -1;
        assert!(!options.is_valid());
    }

    #[test]
    fn test_population_bounds() {
        let mut options = SearchOptions::default();
        options.solution_population_size = 4;
        assert!(!options.is_valid());

        let mut options = SearchOptions::default();
        options.trainer_population_size = 0;
        assert!(!options.is_valid());
    }

    #[test]
    fn test_probability_bounds() {
        let mut options = SearchOptions::default();
        options.solution_mutation_probability = 1.5;
        assert!(!options.is_valid());

        let mut options = SearchOptions::default();
        options.predictor_crossover_probability = -0.1;
        assert!(!options.is_valid());
    }

    #[test]
    fn test_implicit_error_needs_dependencies() {
        let mut options = SearchOptions::default();
        options.fitness_metric = fitness::IMPLICIT_ERROR;
        assert!(!options.is_valid());

        options.implicit_derivative_dependencies = "D(y)/D(x)".into();
        assert!(options.is_valid());
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(fitness::name(fitness::ABSOLUTE_ERROR), "Absolute Error");
        assert_eq!(fitness::name(fitness::SLOPE_ERROR), "Slope Error");
        assert_eq!(fitness::name(99), "Unknown?");
    }

    #[test]
    fn test_summary() {
        let options = SearchOptions::new("y = f(x)");
        let summary = options.summary();
        assert!(summary.contains("\"y = f(x)\""));
        assert!(summary.contains("8 building-block types"));
        assert!(summary.contains("Absolute Error fitness"));
        assert!(!summary.contains("Invalid!"));
    }

    #[test]
    fn test_summary_flags_invalid() {
        let options = SearchOptions::new("");
        assert!(options.summary().starts_with("Invalid! "));
    }
}
