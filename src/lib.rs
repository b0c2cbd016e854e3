//! Employee gateway library.
//!
//! A REST façade over an upstream employee API: listing, searching,
//! salary aggregation, creation and deletion, with every record fetched
//! fresh from upstream.

pub mod config;
pub mod employee;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
