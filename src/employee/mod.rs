//! Employee subsystem: upstream client and aggregation.
//!
//! # Data Flow
//! ```text
//! handler
//!     → service.rs (operation, fallback policy, duplicate check)
//!     → client.rs (HTTP call, envelope decoding)
//!     → upstream employee API
//!     ← aggregate.rs (search, highest salary, top earners)
//! ```

pub mod aggregate;
pub mod client;
pub mod service;
pub mod types;

pub use client::{UpstreamClient, UpstreamError};
pub use service::EmployeeService;
pub use types::{
    CreateEmployeeInput, DeleteEmployeeInput, Employee, EmployeeError, EmployeeResult,
};
