pub mod graph;
pub mod traits;

pub use graph::GraphIndexer;
pub use traits::IndexerRepository;
