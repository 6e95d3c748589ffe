//! Infrastructure: ready index, group sets, and store backends.

pub mod index;
pub mod store;
