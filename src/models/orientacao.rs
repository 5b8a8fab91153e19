// src/models/orientacao.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tipo usado quando a orientação nasce de um feedback sobre o jogador.
pub const TIPO_FEEDBACK: &str = "feedback";

/// Orientação enviada pelo professor a um atleta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orientacao {
    pub id: String,
    pub tipo: String,
    pub titulo: String,
    pub descricao: String,
    pub data: DateTime<Utc>,
    #[serde(default)]
    pub lida: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NovaOrientacao {
    #[validate(custom(function = "crate::models::not_blank", message = "o tipo é obrigatório"))]
    pub tipo: String,
    #[validate(custom(function = "crate::models::not_blank", message = "o título é obrigatório"))]
    pub titulo: String,
    #[validate(custom(function = "crate::models::not_blank", message = "a descrição é obrigatória"))]
    pub descricao: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NovoFeedback {
    #[validate(custom(function = "crate::models::not_blank", message = "a mensagem é obrigatória"))]
    pub mensagem: String,
}
