// src/keys.rs
//! Chaves do armazenamento local. O formato é herdado da aplicação móvel e não tem versão.

pub const PREFIXO: &str = "@GestaoTimes:";

pub const USERS: &str = "@GestaoTimes:users";
/// Sessão atual (um único registo).
pub const SESSAO: &str = "@GestaoTimes:user";
pub const TEAMS: &str = "@GestaoTimes:teams";
pub const PLAYERS: &str = "@GestaoTimes:players";
pub const EVENTS: &str = "@GestaoTimes:events";
/// Mapa global id do jogador -> feedbacks recebidos.
pub const FEEDBACKS: &str = "feedbacks";

pub fn orientacoes(user_id: &str) -> String {
    format!("{PREFIXO}orientacoes_{user_id}")
}

pub fn player_stats(player_id: &str) -> String {
    format!("{PREFIXO}player_stats_{player_id}")
}

pub fn profile_image(user_id: &str) -> String {
    format!("{PREFIXO}profile_image_{user_id}")
}

pub fn athlete_settings(user_id: &str) -> String {
    format!("{PREFIXO}athlete_settings_{user_id}")
}
