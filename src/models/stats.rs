// src/models/stats.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registo de estatísticas de um jogador numa partida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRecord {
    pub id: String,
    pub player_id: String,
    pub data: NaiveDate,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub cards: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStatRecord {
    /// Dia da partida; por omissão, hoje.
    pub data: Option<NaiveDate>,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub cards: u32,
    pub event_id: Option<String>,
}

/// Números agregados para o painel do professor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_times: usize,
    pub total_jogadores: usize,
    pub total_eventos: usize,
    pub eventos_hoje: usize,
    pub proximos_eventos: usize,
    pub total_gols: u32,
    pub total_assistencias: u32,
    pub total_jogos: u32,
    pub times_por_esporte: BTreeMap<String, usize>,
}
