//! Async runtime adapters.

pub mod tokio_store;

pub use tokio_store::AsyncStoreHandle;
