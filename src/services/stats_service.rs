// src/services/stats_service.rs
use crate::{
    error::{AppError, AppResult},
    keys,
    models::{
        player::Player,
        stats::{NewStatRecord, StatRecord},
    },
    services::app_data::AppData,
    store::Storage,
};
use chrono::{Local, Utc};
use uuid::Uuid;

/// Histórico de partidas do jogador, por data.
pub async fn history(storage: &Storage, player_id: &str) -> AppResult<Vec<StatRecord>> {
    let mut registos: Vec<StatRecord> = storage.get_list(&keys::player_stats(player_id)).await?;
    registos.sort_by_key(|r| (r.data, r.created_at));
    Ok(registos)
}

/// Guarda as estatísticas de uma partida e atualiza os totais do jogador.
pub async fn record_stats(
    storage: &Storage,
    data: &AppData,
    player_id: &str,
    novo: NewStatRecord,
) -> AppResult<(StatRecord, Player)> {
    if data.find_player(player_id).await.is_none() {
        return Err(AppError::NotFound(format!("jogador {player_id}")));
    }

    let registo = StatRecord {
        id: Uuid::new_v4().to_string(),
        player_id: player_id.to_string(),
        data: novo.data.unwrap_or_else(|| Local::now().date_naive()),
        goals: novo.goals,
        assists: novo.assists,
        cards: novo.cards,
        event_id: novo.event_id.filter(|e| !e.is_empty()),
        created_at: Utc::now(),
    };

    // Totais antes do histórico
    let player = data.apply_stat_record(&registo).await?;

    let entrada = registo.clone();
    storage
        .update_list::<StatRecord, _, _>(&keys::player_stats(player_id), move |lista| {
            lista.push(entrada);
            Ok(())
        })
        .await?;
    tracing::info!(
        "📊 Estatísticas registadas para '{}': {} gol(s), {} assistência(s), {} cartão(ões).",
        player_id,
        registo.goals,
        registo.assists,
        registo.cards
    );
    Ok((registo, player))
}
