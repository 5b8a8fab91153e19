// src/models/team.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Time. O antigo campo `players` (número ou lista, conforme o ecrã que gravou)
/// é ignorado na leitura: a contagem vem do `teamId` dos jogadores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<String>,
}

impl Team {
    pub fn games_played(&self) -> u32 {
        self.wins.saturating_add(self.losses).saturating_add(self.draws)
    }

    pub fn apply(&mut self, patch: TeamPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(sport) = patch.sport {
            self.sport = sport.trim().to_string();
        }
        if let Some(wins) = patch.wins {
            self.wins = wins;
        }
        if let Some(losses) = patch.losses {
            self.losses = losses;
        }
        if let Some(draws) = patch.draws {
            self.draws = draws;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTeam {
    #[validate(custom(function = "crate::models::not_blank", message = "o nome do time é obrigatório"))]
    pub name: String,
    #[validate(custom(function = "crate::models::not_blank", message = "a modalidade é obrigatória"))]
    pub sport: String,
    #[serde(default)]
    pub professor_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeamPatch {
    #[validate(custom(function = "crate::models::not_blank", message = "o nome do time não pode ficar vazio"))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::models::not_blank", message = "a modalidade não pode ficar vazia"))]
    pub sport: Option<String>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub draws: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Vitoria,
    Derrota,
    Empate,
}

/// Time com a contagem de jogadores calculada.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    #[serde(flatten)]
    pub team: Team,
    pub players_count: usize,
    pub games_played: u32,
}

impl TeamSummary {
    pub fn new(team: Team, players_count: usize) -> Self {
        let games_played = team.games_played();
        Self {
            team,
            players_count,
            games_played,
        }
    }
}
