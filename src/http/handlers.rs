//! REST handlers for the employee surface.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::employee::{CreateEmployeeInput, Employee, EmployeeError, EmployeeResult};
use crate::http::server::AppState;

/// `GET /`
pub async fn list_employees(State(state): State<AppState>) -> EmployeeResult<Json<Vec<Employee>>> {
    state.employees.list_all().await.map(Json)
}

/// `GET /search/{term}`
pub async fn search_employees(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> EmployeeResult<Json<Vec<Employee>>> {
    state.employees.search_by_name(&term).await.map(Json)
}

/// `GET /{id}`; the id is checked before anything goes upstream.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> EmployeeResult<Json<Employee>> {
    let id = parse_id(&id)?;
    state.employees.get_by_id(id).await.map(Json)
}

/// `GET /highestSalary`
pub async fn highest_salary(State(state): State<AppState>) -> EmployeeResult<Json<i64>> {
    state.employees.highest_salary().await.map(Json)
}

/// `GET /topTenHighestEarningEmployeeNames`
pub async fn top_ten_names(State(state): State<AppState>) -> EmployeeResult<Json<Vec<String>>> {
    state.employees.top_ten_names().await.map(Json)
}

/// `POST /`; body rejections are reported as `EmployeeError`s so every
/// failure carries the JSON error body.
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeInput>, JsonRejection>,
) -> EmployeeResult<Json<Employee>> {
    let Json(input) = payload?;
    state.employees.create(input).await.map(Json)
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// `DELETE /?id=...`; answers with the upstream status message as text.
///
/// The id is a query parameter so the route does not collide with `/{id}`.
pub async fn delete_employee(
    State(state): State<AppState>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> EmployeeResult<String> {
    let Query(params) = params?;
    let raw = params
        .id
        .ok_or_else(|| EmployeeError::InvalidInput("missing 'id' query parameter".into()))?;
    let id = parse_id(&raw)?;
    state.employees.delete(id).await
}

fn parse_id(raw: &str) -> EmployeeResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| EmployeeError::InvalidId(raw.to_string()))
}
