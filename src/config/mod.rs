//! Configuration models for the job store.

pub mod store;

pub use store::{IndexOrdering, StoreConfig, ENV_INDEX_ORDERING, ENV_STORE_NAME};
