mod dto;
mod indexer;
pub mod subgraph_client;

pub use indexer::GraphIndexer;
pub use subgraph_client::SubgraphClient;
