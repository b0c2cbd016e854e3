//! Employee records, request inputs, and upstream wire envelopes.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::employee::client::UpstreamError;

/// An employee record as served by the upstream API.
///
/// Field names follow the upstream wire format and are served unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,

    #[serde(rename = "employee_name")]
    pub name: String,

    /// Parsed salary; `None` when upstream sent something that is not a
    /// base-10 integer.
    #[serde(
        rename = "employee_salary",
        default,
        deserialize_with = "deserialize_salary"
    )]
    pub salary: Option<i64>,

    #[serde(rename = "employee_age", default, deserialize_with = "null_as_default")]
    pub age: u32,

    #[serde(rename = "employee_title", default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(rename = "employee_email", default, deserialize_with = "null_as_default")]
    pub email: String,
}

/// Accepts a JSON number or a numeric string; anything else decodes as `None`.
fn deserialize_salary<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Caller-supplied fields for a new employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CreateEmployeeInput {
    pub fn validate(&self) -> Result<(), EmployeeError> {
        if self.name.trim().is_empty() {
            return Err(EmployeeError::InvalidInput("name must not be blank".into()));
        }
        Ok(())
    }
}

/// Body of the upstream delete call; upstream deletes by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeInput {
    pub name: String,
}

/// `{ "data": ... }` wrapper used by upstream for records and lists.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// `{ "status": ... }` wrapper returned by upstream deletes.
#[derive(Debug, Deserialize)]
pub struct StatusEnvelope {
    pub status: String,
}

/// Errors produced by employee operations.
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// Identifier did not parse as a UUID.
    #[error("invalid employee id '{0}'")]
    InvalidId(String),

    /// Request body failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Request body exceeded the configured size limit.
    #[error("request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("{0} not found")]
    NotFound(String),

    /// An employee with the same name already exists.
    #[error("employee named '{0}' already exists")]
    Conflict(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;
