pub mod traits;
pub mod dijkstra;
pub mod bellman_ford;
pub mod bmssp;

pub mod base_case;
pub mod correction;
pub mod params;
pub mod pivots;
pub mod state;

pub use bmssp::BmsspOutput;
pub use traits::{ShortestPathAlgorithm, ShortestPathResult};
