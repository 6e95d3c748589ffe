//! In-memory indices maintained by the store.

pub mod membership;
pub mod ordered;

pub use membership::GroupMembership;
pub use ordered::{by_fire_time, by_key, comparator, OrderedIndex, TriggerHandle};
