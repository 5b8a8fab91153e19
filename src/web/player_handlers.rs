// src/web/player_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        orientacao::NovoFeedback,
        player::{Feedback, NewPlayer, Player, PlayerPatch, PlayerView},
        stats::{NewStatRecord, StatRecord},
    },
    services::{orientacao_service::{self, FeedbackEnviado}, stats_service},
    state::AppState,
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
pub struct FiltroJogadores {
    pub sport: Option<String>,
    pub team: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsRegistadas {
    pub registo: StatRecord,
    pub player: Player,
}

// GET /api/players?sport=&team=
pub async fn list_players(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroJogadores>,
) -> Json<Vec<Player>> {
    let mut players = match filtro.sport.as_deref() {
        Some(sport) => state.data.get_players_by_sport(sport).await,
        None => state.data.players().await,
    };
    if let Some(team) = filtro.team.as_deref() {
        players.retain(|p| p.team_id == team);
    }
    Json(players)
}

// GET /api/players/{id}
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PlayerView>> {
    let player = find_or_404(&state, &id).await?;
    Ok(Json(state.data.player_view(player).await))
}

// POST /api/players
pub async fn create_player(
    State(state): State<AppState>,
    Json(novo): Json<NewPlayer>,
) -> AppResult<(StatusCode, Json<Player>)> {
    let player = state.data.add_player(novo).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

// PATCH /api/players/{id}
pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PlayerPatch>,
) -> AppResult<Json<Player>> {
    Ok(Json(state.data.update_player(&id, patch).await?))
}

// DELETE /api/players/{id}
pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.data.delete_player(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/players/{id}/feedback
pub async fn send_feedback(
    State(state): State<AppState>,
    Extension(CurrentUser(professor)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(novo): Json<NovoFeedback>,
) -> AppResult<(StatusCode, Json<FeedbackEnviado>)> {
    let enviado =
        orientacao_service::send_feedback(&state.storage, &state.data, &id, novo, &professor).await?;
    Ok((StatusCode::CREATED, Json(enviado)))
}

// GET /api/players/{id}/feedback
pub async fn list_feedbacks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Feedback>>> {
    find_or_404(&state, &id).await?;
    Ok(Json(orientacao_service::feedbacks_for(&state.storage, &id).await?))
}

// GET /api/players/{id}/stats
pub async fn stats_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<StatRecord>>> {
    find_or_404(&state, &id).await?;
    Ok(Json(stats_service::history(&state.storage, &id).await?))
}

// POST /api/players/{id}/stats
pub async fn record_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(novo): Json<NewStatRecord>,
) -> AppResult<(StatusCode, Json<StatsRegistadas>)> {
    let (registo, player) = stats_service::record_stats(&state.storage, &state.data, &id, novo).await?;
    Ok((StatusCode::CREATED, Json(StatsRegistadas { registo, player })))
}

async fn find_or_404(state: &AppState, id: &str) -> AppResult<Player> {
    state
        .data
        .find_player(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("jogador {id}")))
}
