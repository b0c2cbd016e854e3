//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Build the upstream client and service once, share them via state
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::employee::{EmployeeService, UpstreamClient, UpstreamError};
use crate::http::handlers;
use crate::http::middleware::track_metrics;
use crate::http::request::make_request_span;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<EmployeeService>,
}

/// HTTP server for the employee gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamError> {
        let client = UpstreamClient::new(&config.upstream)?;
        tracing::info!(
            upstream = %client.base_url(),
            on_read_failure = ?config.upstream.on_read_failure,
            "Upstream client ready"
        );

        let state = AppState {
            employees: Arc::new(EmployeeService::new(
                client,
                config.upstream.on_read_failure,
            )),
        };

        let router = build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
///
/// Static routes take precedence over the `/{id}` capture.
#[allow(deprecated)]
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_employees)
                .post(handlers::create_employee)
                .delete(handlers::delete_employee),
        )
        .route("/search/{term}", get(handlers::search_employees))
        .route("/highestSalary", get(handlers::highest_salary))
        .route(
            "/topTenHighestEarningEmployeeNames",
            get(handlers::top_ten_names),
        )
        .route("/{id}", get(handlers::get_employee))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                )))
                .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
                .layer(middleware::from_fn(track_metrics)),
        )
}
