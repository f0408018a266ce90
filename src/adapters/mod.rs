// Adapters layer: concrete region sources and the data fixes applied on load.

pub mod cleaning;
pub mod json_repository;
pub mod memory;

pub use json_repository::JsonDirectoryRepository;
pub use memory::InMemoryRepository;
