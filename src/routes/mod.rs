//! Route gateway: merges every sibling subrouter and attaches shared state.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;

use crate::{Config, MemStore, OpenWeatherClient};

mod aqi;
mod cities;
mod favorites;
mod health;
mod location;
mod rankings;

// ---

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    // ---
    pub store: Arc<MemStore>,
    pub provider: OpenWeatherClient,
    pub config: Config,
}

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(cities::router())
        .merge(location::router())
        .merge(rankings::router())
        .merge(favorites::router())
        .merge(aqi::router())
        .merge(health::router())
        .with_state(state)
}

// ---

/// JSON body for every non-2xx response.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Build an error response; `detail` is the underlying cause, if any.
fn error_response(status: StatusCode, message: &str, detail: Option<String>) -> Response {
    // ---
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
            error: detail,
        }),
    )
        .into_response()
}
