//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    routing::{get, post, MethodRouter},
    Json, Router,
};
use tracing::error;
use utoipa::OpenApi;

use crate::{
    domain::contact::ContactService,
    infrastructure::http::{errors::ErrorResponse, open_api::ApiDocs, state::AppState},
};

pub mod send_email;
pub mod uptime;

/// Routes served under `/api`
pub fn router<C: ContactService>() -> Router<AppState<C>> {
    let send_email = send_email_route::<C>();

    Router::new()
        .route("/sendEmail", send_email.clone())
        .route("/SendEmail", send_email)
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler::<C>))
}

/// The relay accepts `POST` and `OPTIONS`; anything else is answered with 405
fn send_email_route<C: ContactService>() -> MethodRouter<AppState<C>> {
    post(send_email::handler::<C>)
        .options(send_email::preflight)
        .fallback(send_email::method_not_allowed)
}

/// Catch panics and return a 500 error
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown error".to_string()
    };

    error!("handler panicked: {details}");

    let error = ErrorResponse {
        message: "Internal server error".to_string(),
        error: Some(details),
        details: None,
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
}
