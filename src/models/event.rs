// src/models/event.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Jogo,
    Treino,
    Reuniao,
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Jogo => "Jogo",
            EventType::Treino => "Treino",
            EventType::Reuniao => "Reunião",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub sport: String,
    /// Dia do evento (YYYY-MM-DD), em hora local.
    pub date: NaiveDate,
    #[serde(default)]
    pub time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(event_type) = patch.event_type {
            self.event_type = event_type;
        }
        if let Some(sport) = patch.sport {
            self.sport = sport.trim().to_string();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(location) = patch.location {
            self.location = Some(location).filter(|l| !l.trim().is_empty());
        }
        if let Some(team_id) = patch.team_id {
            self.team_id = Some(team_id).filter(|t| !t.is_empty());
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    #[validate(custom(function = "crate::models::not_blank", message = "o título é obrigatório"))]
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub sport: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[validate(custom(function = "crate::models::not_blank", message = "o título não pode ficar vazio"))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub sport: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub team_id: Option<String>,
}
