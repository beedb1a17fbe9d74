//! HTTP transport and wire protocol for the trainer API.

pub mod http_client;
pub mod protocol;

pub use http_client::{HttpClient, HttpClientConfig};
pub use protocol::LinearFit;
