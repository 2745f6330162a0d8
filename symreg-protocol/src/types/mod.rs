//! Domain types exchanged with the search server

mod data;
mod frontier;
mod options;
mod progress;
mod server;
mod solution;

pub use data::{DataSet, DataSetError};
pub use frontier::SolutionFrontier;
pub use options::{fitness, SearchOptions};
pub use progress::SearchProgress;
pub use server::ServerInfo;
pub use solution::{SolutionInfo, UNEVALUATED};
