// src/test/mod.rs
mod app_data;
pub mod utils;
