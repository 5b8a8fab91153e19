// src/models/settings.rs
use serde::{Deserialize, Serialize};

/// Preferências do atleta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AthleteSettings {
    pub notificacoes: bool,
    pub lembretes_treino: bool,
    pub lembretes_jogo: bool,
    pub perfil_publico: bool,
}

impl Default for AthleteSettings {
    fn default() -> Self {
        Self {
            notificacoes: true,
            lembretes_treino: true,
            lembretes_jogo: true,
            perfil_publico: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImage {
    pub data_uri: String,
}
