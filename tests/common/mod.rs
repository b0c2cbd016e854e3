//! Shared utilities for integration testing: an in-memory mock of the
//! upstream employee API and a gateway wired to it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use employee_gateway::config::{FallbackPolicy, GatewayConfig};
use employee_gateway::{HttpServer, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const UPSTREAM_PATH: &str = "/api/v1/employee";
pub const DELETE_STATUS: &str = "Successfully processed request.";

/// How the mock upstream answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// 200 with a body that is not JSON.
    Garbage,
    /// 500 for everything.
    Failing,
    /// 500 for the collection read only.
    FailingList,
    /// 500 for deletes only.
    FailingDelete,
    /// Answers normally after the delay.
    Slow(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Get,
    Create,
    Delete,
}

#[derive(Clone)]
struct MockState {
    employees: Arc<Mutex<Vec<Value>>>,
    mode: Arc<Mutex<Mode>>,
    hits: Arc<AtomicUsize>,
}

impl MockState {
    /// Count the call and return the degraded response for it, if any.
    async fn hit(&self, operation: Operation) -> Option<Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let mode = *self.mode.lock().unwrap();
        match mode {
            Mode::Normal => None,
            Mode::Garbage => Some((StatusCode::OK, "<html>maintenance</html>").into_response()),
            Mode::Failing => Some(StatusCode::INTERNAL_SERVER_ERROR.into_response()),
            Mode::FailingList if operation == Operation::List => {
                Some(StatusCode::INTERNAL_SERVER_ERROR.into_response())
            }
            Mode::FailingDelete if operation == Operation::Delete => {
                Some(StatusCode::INTERNAL_SERVER_ERROR.into_response())
            }
            Mode::FailingList | Mode::FailingDelete => None,
            Mode::Slow(delay) => {
                tokio::time::sleep(delay).await;
                None
            }
        }
    }
}

/// Handle on a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    state: MockState,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, UPSTREAM_PATH)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn set_mode(&self, mode: Mode) {
        *self.state.mode.lock().unwrap() = mode;
    }

    pub fn employees(&self) -> Vec<Value> {
        self.state.employees.lock().unwrap().clone()
    }
}

/// Build an upstream record the way the mock API serves it.
pub fn employee(name: &str, salary: impl Into<Value>) -> Value {
    json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "employee_name": name,
        "employee_salary": salary.into(),
        "employee_age": 35,
        "employee_title": "Engineer",
        "employee_email": format!("{}@company.com", name.to_lowercase().replace(' ', "."))
    })
}

/// Start a mock upstream seeded with `seed` on an ephemeral port.
pub async fn start_mock_upstream(seed: Vec<Value>) -> MockUpstream {
    let state = MockState {
        employees: Arc::new(Mutex::new(seed)),
        mode: Arc::new(Mutex::new(Mode::Normal)),
        hits: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route(
            UPSTREAM_PATH,
            get(list_employees).post(create_employee).delete(delete_employee),
        )
        .route(&format!("{}/{{id}}", UPSTREAM_PATH), get(get_employee))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, state }
}

async fn list_employees(State(state): State<MockState>) -> Response {
    if let Some(response) = state.hit(Operation::List).await {
        return response;
    }
    let employees = state.employees.lock().unwrap().clone();
    Json(json!({ "data": employees, "status": DELETE_STATUS })).into_response()
}

async fn get_employee(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    if let Some(response) = state.hit(Operation::Get).await {
        return response;
    }
    let employees = state.employees.lock().unwrap();
    match employees.iter().find(|e| e["id"] == id.as_str()) {
        Some(e) => Json(json!({ "data": e, "status": DELETE_STATUS })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_employee(State(state): State<MockState>, Json(input): Json<Value>) -> Response {
    if let Some(response) = state.hit(Operation::Create).await {
        return response;
    }
    let name = input["name"].as_str().unwrap_or_default().to_string();
    let created = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "employee_name": name,
        "employee_salary": input["salary"].clone(),
        "employee_age": input["age"].clone(),
        "employee_title": input["title"].clone(),
        "employee_email": format!("{}@company.com", name.to_lowercase().replace(' ', "."))
    });
    state.employees.lock().unwrap().push(created.clone());
    Json(json!({ "data": created, "status": DELETE_STATUS })).into_response()
}

async fn delete_employee(State(state): State<MockState>, Json(input): Json<Value>) -> Response {
    if let Some(response) = state.hit(Operation::Delete).await {
        return response;
    }
    let mut employees = state.employees.lock().unwrap();
    match employees.iter().position(|e| e["employee_name"] == input["name"]) {
        Some(index) => {
            employees.remove(index);
            Json(json!({ "data": true, "status": DELETE_STATUS })).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A running gateway and the means to stop it.
pub struct Gateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway against `upstream_url` on an ephemeral port.
pub async fn start_gateway(upstream_url: &str, policy: FallbackPolicy) -> Gateway {
    start_gateway_with(upstream_url, policy, |_| {}).await
}

/// Like [`start_gateway`], with a hook to adjust the config before startup.
pub async fn start_gateway_with(
    upstream_url: &str,
    policy: FallbackPolicy,
    configure: impl FnOnce(&mut GatewayConfig),
) -> Gateway {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = upstream_url.to_string();
    config.upstream.on_read_failure = policy;
    config.upstream.connect_timeout_secs = 1;
    config.upstream.request_timeout_secs = 2;
    config.observability.metrics_enabled = false;
    configure(&mut config);

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Gateway { addr, shutdown }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
