//! Job store backends.

pub mod memory;

pub use memory::RamJobStore;
