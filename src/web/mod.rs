// src/web/mod.rs
pub mod auth_handlers;
pub mod event_handlers;
pub mod mw_auth;
pub mod mw_professor;
pub mod orientacao_handlers;
pub mod player_handlers;
pub mod profile_handlers;
pub mod routes;
pub mod team_handlers;
pub mod user_handlers;
