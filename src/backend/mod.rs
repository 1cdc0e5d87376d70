//! Recommendation service backend: wire types, transport and API client

pub mod api;
pub mod transport;
pub mod types;
