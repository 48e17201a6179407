pub mod traits;
pub mod directed;
pub mod generators;
pub mod loader;

pub use traits::{Graph, MutableGraph};
pub use directed::DirectedGraph;
pub use loader::EdgeList;
