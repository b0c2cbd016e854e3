//! Employee operations composed from upstream calls and aggregation.
//!
//! Every operation fetches fresh data; nothing is cached between calls.
//! `create` checks for a duplicate name and then posts, with no lock in
//! between, so two concurrent creators of the same name can both succeed.

use uuid::Uuid;

use crate::config::FallbackPolicy;
use crate::employee::aggregate::{self, TOP_EARNERS_LIMIT};
use crate::employee::client::{UpstreamClient, UpstreamError};
use crate::employee::types::{
    CreateEmployeeInput, DeleteEmployeeInput, Employee, EmployeeError, EmployeeResult,
};

/// Employee operations exposed to the transport layer.
#[derive(Debug, Clone)]
pub struct EmployeeService {
    client: UpstreamClient,
    on_read_failure: FallbackPolicy,
}

impl EmployeeService {
    pub fn new(client: UpstreamClient, on_read_failure: FallbackPolicy) -> Self {
        Self {
            client,
            on_read_failure,
        }
    }

    /// Every employee known upstream.
    pub async fn list_all(&self) -> EmployeeResult<Vec<Employee>> {
        match self.client.fetch_all().await {
            Ok(employees) => {
                tracing::debug!(count = employees.len(), "Fetched employees");
                Ok(employees)
            }
            Err(e) => self.read_fallback(e, Vec::new),
        }
    }

    /// Employees whose name contains `term` (case-sensitive).
    pub async fn search_by_name(&self, term: &str) -> EmployeeResult<Vec<Employee>> {
        let employees = self.list_all().await?;
        Ok(aggregate::search_by_name(employees, term))
    }

    /// Highest parsed salary across all employees.
    pub async fn highest_salary(&self) -> EmployeeResult<i64> {
        let employees = self.list_all().await?;
        log_unsalaried(&employees);
        aggregate::highest_salary(&employees)
            .ok_or_else(|| EmployeeError::NotFound("salary data".into()))
    }

    /// Names of the ten best paid employees, highest first.
    pub async fn top_ten_names(&self) -> EmployeeResult<Vec<String>> {
        let employees = self.list_all().await?;
        log_unsalaried(&employees);
        Ok(aggregate::top_earner_names(&employees, TOP_EARNERS_LIMIT))
    }

    pub async fn get_by_id(&self, id: Uuid) -> EmployeeResult<Employee> {
        let found = match self.client.fetch_one(id).await {
            Ok(found) => found,
            Err(e) => self.read_fallback(e, || None)?,
        };
        found.ok_or_else(|| EmployeeError::NotFound(format!("employee {}", id)))
    }

    /// Create an employee unless one with the exact same name exists.
    pub async fn create(&self, input: CreateEmployeeInput) -> EmployeeResult<Employee> {
        input.validate()?;

        let employees = match self.client.fetch_all().await {
            Ok(employees) => employees,
            Err(e) => {
                let employees = self.read_fallback(e, Vec::new)?;
                tracing::warn!(
                    name = %input.name,
                    "Employee list unavailable, creating without duplicate check"
                );
                employees
            }
        };
        if aggregate::find_by_name(&employees, &input.name).is_some() {
            tracing::info!(name = %input.name, "Rejecting duplicate employee name");
            return Err(EmployeeError::Conflict(input.name));
        }

        let created = self.client.create(&input).await?;
        tracing::info!(employee_id = %created.id, name = %created.name, "Employee created");
        Ok(created)
    }

    /// Delete the employee with `id`, returning the upstream status message.
    pub async fn delete(&self, id: Uuid) -> EmployeeResult<String> {
        let employee = self.get_by_id(id).await?;
        let input = DeleteEmployeeInput {
            name: employee.name,
        };

        let status = self.client.delete_by_name(&input).await?;
        tracing::info!(employee_id = %id, name = %input.name, status = %status, "Employee deleted");
        Ok(status)
    }

    fn read_fallback<T>(&self, error: UpstreamError, empty: impl FnOnce() -> T) -> EmployeeResult<T> {
        match self.on_read_failure {
            FallbackPolicy::Empty => {
                tracing::warn!(error = %error, "Upstream read failed, answering with empty result");
                Ok(empty())
            }
            FallbackPolicy::Error => {
                tracing::error!(error = %error, "Upstream read failed");
                Err(error.into())
            }
        }
    }
}

fn log_unsalaried(employees: &[Employee]) {
    let skipped = aggregate::unsalaried_count(employees);
    if skipped > 0 {
        tracing::warn!(skipped, "Employees without a numeric salary left out of aggregation");
    }
}
