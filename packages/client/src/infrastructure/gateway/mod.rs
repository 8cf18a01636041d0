//! Gateway implementations.
//!
//! Concrete implementations of the gateway traits defined by the domain layer.
//! The UseCase layer depends on the traits and never on these types directly.

pub mod http;

pub use http::HttpGateway;
