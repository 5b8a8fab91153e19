// src/services/mod.rs
pub mod app_data;
pub mod auth_service;
pub mod backup_service;
pub mod orientacao_service;
pub mod profile_service;
pub mod stats_service;
pub mod user_service;
