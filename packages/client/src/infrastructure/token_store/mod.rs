//! TokenStore implementations.

pub mod file;
pub mod inmemory;

pub use file::FileTokenStore;
pub use inmemory::InMemoryTokenStore;
