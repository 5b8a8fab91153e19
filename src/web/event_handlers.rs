// src/web/event_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::event::{Event, EventPatch, NewEvent},
    state::AppState,
};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};

// GET /api/events
pub async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.data.events().await)
}

// GET /api/events/today
pub async fn today_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.data.get_today_events().await)
}

// GET /api/events/upcoming
pub async fn upcoming_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.data.get_upcoming_events().await)
}

// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Event>> {
    state
        .data
        .find_event(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("evento {id}")))
}

// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(novo): Json<NewEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = state.data.add_event(novo).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.data.update_event(&id, patch).await?))
}

// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.data.delete_event(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
