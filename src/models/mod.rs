// src/models/mod.rs
pub mod event;
pub mod orientacao;
pub mod player;
pub mod settings;
pub mod stats;
pub mod team;
pub mod user;

use validator::ValidationError;

/// Validador para campos de texto obrigatórios: só espaços conta como vazio.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("em_branco"));
    }
    Ok(())
}

/// Compara modalidades sem distinguir maiúsculas ("Futebol" == "futebol").
pub fn same_sport(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Trata `Some("")` e `Some("  ")` como ausência de valor.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
