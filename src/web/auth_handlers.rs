// src/web/auth_handlers.rs
use crate::{
    error::AppResult,
    models::user::{LoginForm, PublicUser, SignUpForm},
    services::auth_service,
    state::AppState,
};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};

// POST /api/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> AppResult<Json<PublicUser>> {
    let user = auth_service::sign_in(&state.storage, &form.email, &form.password).await?;
    Ok(Json(user))
}

// POST /api/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(form): Json<SignUpForm>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let user = auth_service::sign_up(&state.storage, &state.data, form).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// POST /api/logout
pub async fn handle_logout(State(state): State<AppState>) -> AppResult<StatusCode> {
    auth_service::sign_out(&state.storage).await?;
    Ok(StatusCode::NO_CONTENT)
}
