//! Storage implementations for data services

pub mod in_memory;

pub use in_memory::InMemoryDataService;
