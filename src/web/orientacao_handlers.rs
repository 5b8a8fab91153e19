// src/web/orientacao_handlers.rs
use crate::{
    error::AppResult,
    models::orientacao::{NovaOrientacao, Orientacao},
    services::orientacao_service,
    state::AppState,
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CaixaOrientacoes {
    pub nao_lidas: usize,
    pub orientacoes: Vec<Orientacao>,
}

// GET /api/orientacoes (as do utilizador da sessão)
pub async fn list_orientacoes(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<CaixaOrientacoes>> {
    let orientacoes = orientacao_service::list_orientacoes(&state.storage, &user.id).await?;
    let nao_lidas = orientacao_service::count_unread(&state.storage, &user.id).await?;
    Ok(Json(CaixaOrientacoes { nao_lidas, orientacoes }))
}

// POST /api/orientacoes/{id} (apenas professores; id do atleta)
pub async fn send_orientacao(
    State(state): State<AppState>,
    Extension(CurrentUser(professor)): Extension<CurrentUser>,
    Path(user_id): Path<String>,
    Json(nova): Json<NovaOrientacao>,
) -> AppResult<(StatusCode, Json<Orientacao>)> {
    let orientacao =
        orientacao_service::send_to_athlete(&state.storage, &user_id, nova, &professor).await?;
    Ok((StatusCode::CREATED, Json(orientacao)))
}

// POST /api/orientacoes/{id}/lida
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Orientacao>> {
    Ok(Json(orientacao_service::mark_as_read(&state.storage, &user.id, &id).await?))
}
