pub mod graph;
pub mod store;

pub use graph::{ContractGraph, GraphId, StoreError};
pub use store::{GraphStore, StoreConfig, StoreStats};
