// src/models/player.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub goals: u32,
    pub assists: u32,
    pub games: u32,
    pub cards: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    /// Foto em data URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub mensagem: String,
    pub data: DateTime<Utc>,
    pub professor: String,
}

/// Jogador. Registos antigos com campos em falta recebem os valores por omissão
/// na leitura, em vez de serem "reparados" à mão.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub position: String,
    /// Vazio quando o jogador não tem time. Pode apontar para um time já apagado.
    #[serde(default)]
    pub team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub stats: PlayerStats,
    #[serde(default)]
    pub profile: PlayerProfile,
    #[serde(default)]
    pub feedbacks: Vec<Feedback>,
}

impl Player {
    pub fn has_team(&self) -> bool {
        !self.team_id.is_empty()
    }

    /// Aplica apenas os campos presentes no patch.
    pub fn apply(&mut self, patch: PlayerPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(sport) = patch.sport {
            self.sport = sport.trim().to_string();
        }
        if let Some(position) = patch.position {
            self.position = position.trim().to_string();
        }
        if let Some(team_id) = patch.team_id {
            self.team_id = team_id;
        }
        if let Some(stats) = patch.stats {
            self.stats = stats;
        }
        if let Some(profile) = patch.profile {
            self.profile = profile;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    #[validate(custom(function = "crate::models::not_blank", message = "o nome do jogador é obrigatório"))]
    pub name: String,
    #[validate(custom(function = "crate::models::not_blank", message = "a modalidade é obrigatória"))]
    pub sport: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub profile: Option<PlayerProfile>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    #[validate(custom(function = "crate::models::not_blank", message = "o nome do jogador não pode ficar vazio"))]
    pub name: Option<String>,
    pub sport: Option<String>,
    pub position: Option<String>,
    pub team_id: Option<String>,
    pub stats: Option<PlayerStats>,
    pub profile: Option<PlayerProfile>,
}

/// Jogador com o nome do time resolvido.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    #[serde(flatten)]
    pub player: Player,
    pub team_name: Option<String>,
}
