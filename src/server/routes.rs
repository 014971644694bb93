//! HTTP handlers: thin adapters from axum extractors to `AdminService`

use crate::core::ProxyError;
use crate::orchestration::{AdminService, WelcomeResponse};
use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}

fn respond<T: Serialize>(result: Result<T, ProxyError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn home_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse::default())
}

/// Path segment as a string; a segment axum cannot decode reads as empty
/// and fails validation like any other bad value.
fn path_param(param: Result<Path<String>, PathRejection>) -> String {
    match param {
        Ok(Path(value)) => value,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "undecodable path parameter");
            String::new()
        }
    }
}

pub(crate) async fn generate_password_handler(
    State(service): State<AdminService>,
    username: Result<Path<String>, PathRejection>,
) -> Response {
    respond(service.generate_password(&path_param(username)).await)
}

pub(crate) async fn missing_username_handler(State(service): State<AdminService>) -> Response {
    respond(service.generate_password("").await)
}

pub(crate) async fn create_api_key_handler(
    State(service): State<AdminService>,
    name: Result<Path<String>, PathRejection>,
) -> Response {
    respond(service.create_api_key(&path_param(name)).await)
}

pub(crate) async fn missing_name_handler(State(service): State<AdminService>) -> Response {
    respond(service.create_api_key("").await)
}

pub(crate) async fn tokens_handler(State(service): State<AdminService>) -> Response {
    respond(service.list_root_tokens().await)
}
