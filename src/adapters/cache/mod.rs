//! Analysis Cache Adapter

mod memory;

pub use memory::MemoryCache;
