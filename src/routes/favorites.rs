//! Favorite locations: list, add, edit, remove.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{error_response, AppState};
use crate::models::{FavoriteUpdate, FavoriteWithData, NewFavorite};
use crate::store::StoreError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/favorites", get(list).post(create))
        .route("/api/favorites/{id}", patch(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Json<Vec<FavoriteWithData>> {
    // ---
    debug!("GET /api/favorites");
    let store = &state.store;

    let favorites = store
        .favorites()
        .into_iter()
        .map(|favorite| FavoriteWithData {
            city: store.city(favorite.city_id),
            air_quality: store.air_quality(favorite.city_id),
            weather: store.weather(favorite.city_id),
            favorite,
        })
        .collect();

    Json(favorites)
}

async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewFavorite>, JsonRejection>,
) -> Response {
    // ---
    let new = match body {
        Ok(Json(new)) => new,
        Err(rejection) => return invalid_body(rejection),
    };
    info!("POST /api/favorites '{}'", new.custom_label);

    if new.custom_label.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "customLabel must not be empty", None);
    }

    match state.store.create_favorite(new) {
        Ok(favorite) => (StatusCode::CREATED, Json(favorite)).into_response(),
        Err(e @ StoreError::UnknownCity(_)) => {
            error_response(StatusCode::NOT_FOUND, "City not found", Some(e.to_string()))
        }
        Err(e @ StoreError::FavoriteLimit(_)) => error_response(
            StatusCode::CONFLICT,
            "Favorite limit reached",
            Some(e.to_string()),
        ),
    }
}

async fn update(
    id: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
    body: Result<Json<FavoriteUpdate>, JsonRejection>,
) -> Response {
    // ---
    let Ok(Path(id)) = id else {
        return error_response(StatusCode::NOT_FOUND, "Favorite not found", None);
    };
    let changes = match body {
        Ok(Json(changes)) => changes,
        Err(rejection) => return invalid_body(rejection),
    };
    info!("PATCH /api/favorites/{}", id);

    match state.store.update_favorite(id, changes) {
        Some(favorite) => (StatusCode::OK, Json(favorite)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Favorite not found", None),
    }
}

async fn remove(id: Result<Path<Uuid>, PathRejection>, State(state): State<AppState>) -> Response {
    // ---
    let Ok(Path(id)) = id else {
        return error_response(StatusCode::NOT_FOUND, "Favorite not found", None);
    };
    info!("DELETE /api/favorites/{}", id);

    if state.store.delete_favorite(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error_response(StatusCode::NOT_FOUND, "Favorite not found", None)
    }
}

fn invalid_body(rejection: JsonRejection) -> Response {
    // ---
    warn!("Rejected favorite body: {}", rejection.body_text());
    error_response(
        StatusCode::BAD_REQUEST,
        "Invalid request body",
        Some(rejection.body_text()),
    )
}
