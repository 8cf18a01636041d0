//! Infrastructure layer: HTTP gateway, DTOs, token storage and file access.

pub mod attachment;
pub mod dto;
pub mod gateway;
pub mod token_store;

pub use attachment::load_attachment;
pub use gateway::HttpGateway;
pub use token_store::{FileTokenStore, InMemoryTokenStore};
