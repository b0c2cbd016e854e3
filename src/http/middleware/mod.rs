//! Middleware specific to the gateway; generic layers come from tower-http.

pub mod metrics;

pub use self::metrics::track_metrics;
