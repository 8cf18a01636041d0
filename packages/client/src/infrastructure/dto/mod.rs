//! Data transfer objects for the REST backend.

pub mod http;
