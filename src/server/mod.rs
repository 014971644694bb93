//! Axum HTTP front for the admin proxy.

pub mod request_tracing;
pub mod routes;

use crate::orchestration::AdminService;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use std::any::Any;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;

pub use request_tracing::REQUEST_ID_HEADER;

/// Build the router with all routes and layers.
pub fn router(service: AdminService) -> Router {
    Router::new()
        .route("/", get(routes::home_handler))
        .route(
            "/generate-password/{username}",
            get(routes::generate_password_handler),
        )
        .route(
            "/generate-password",
            get(routes::missing_username_handler),
        )
        .route(
            "/generate-password/",
            get(routes::missing_username_handler),
        )
        .route(
            "/create-chirpstack-api-key/{name}",
            get(routes::create_api_key_handler),
        )
        .route(
            "/create-chirpstack-api-key",
            get(routes::missing_name_handler),
        )
        .route(
            "/create-chirpstack-api-key/",
            get(routes::missing_name_handler),
        )
        .route("/tokens", get(routes::tokens_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(
            request_tracing::request_tracing_middleware,
        ))
        .with_state(service)
}

/// Bind the listener and spawn the server.
///
/// Returns the actual bound `SocketAddr` (useful when binding to port 0).
pub async fn start_server(addr: SocketAddr, service: AdminService) -> io::Result<SocketAddr> {
    let listener = TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;
    let app = router(service);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("admin proxy server error: {}", e);
        }
    });

    tracing::info!(addr = %bound_addr, "admin proxy listening");
    Ok(bound_addr)
}

/// Serve on `addr` until ctrl-c.
pub async fn serve(addr: SocketAddr, service: AdminService) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "admin proxy listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("admin proxy shutting down");
        })
        .await
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
