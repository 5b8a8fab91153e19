// src/web/profile_handlers.rs
use crate::{
    error::AppResult,
    models::settings::{AthleteSettings, ProfileImage},
    services::profile_service,
    state::AppState,
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};

// GET /api/profile/image
pub async fn get_image(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<Option<ProfileImage>>> {
    let imagem = profile_service::get_profile_image(&state.storage, &user.id)
        .await?
        .map(|data_uri| ProfileImage { data_uri });
    Ok(Json(imagem))
}

// PUT /api/profile/image
pub async fn put_image(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(imagem): Json<ProfileImage>,
) -> AppResult<StatusCode> {
    profile_service::set_profile_image(&state.storage, &user.id, &imagem.data_uri).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/profile/image
pub async fn delete_image(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<StatusCode> {
    profile_service::remove_profile_image(&state.storage, &user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/profile/settings
pub async fn get_settings(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<AthleteSettings>> {
    Ok(Json(profile_service::get_settings(&state.storage, &user.id).await?))
}

// PUT /api/profile/settings
pub async fn put_settings(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(settings): Json<AthleteSettings>,
) -> AppResult<Json<AthleteSettings>> {
    profile_service::save_settings(&state.storage, &user.id, &settings).await?;
    Ok(Json(settings))
}
