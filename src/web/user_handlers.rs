// src/web/user_handlers.rs
use crate::{
    error::AppResult,
    models::{
        stats::DashboardStats,
        user::{PasswordChange, ProfileUpdate, PublicUser},
    },
    services::{auth_service, backup_service::{self, BackupResumo}, user_service},
    state::AppState,
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};

// GET /api/me
pub async fn me_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<PublicUser> {
    Json(user)
}

// PUT /api/me
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(patch): Json<ProfileUpdate>,
) -> AppResult<Json<PublicUser>> {
    let atualizado = auth_service::update_profile(&state.storage, &state.data, &user.id, patch).await?;
    Ok(Json(atualizado))
}

// PUT /api/me/password
pub async fn change_password_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(change): Json<PasswordChange>,
) -> AppResult<StatusCode> {
    auth_service::update_password(&state.storage, &user.id, change).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/atletas (apenas professores)
pub async fn my_athletes_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<Vec<PublicUser>>> {
    let atletas = user_service::find_athletes_of(&state.storage, &user.id).await?;
    Ok(Json(atletas.iter().map(PublicUser::from).collect()))
}

// GET /api/stats
pub async fn dashboard_handler(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.data.get_stats().await)
}

// POST /api/backup
pub async fn backup_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<(StatusCode, Json<BackupResumo>)> {
    let resumo = backup_service::create_backup(
        &state.storage,
        &state.data,
        &user,
        &state.config.backup_dir,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(resumo)))
}

// GET /api/diagnostico/chaves (apenas professores)
pub async fn storage_keys_handler(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let chaves = state.storage.keys().await?;
    tracing::info!("🔎 Diagnóstico: {} chave(s) no armazenamento.", chaves.len());
    Ok(Json(chaves))
}
