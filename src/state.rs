// src/state.rs
use crate::{config::Config, services::app_data::AppData, store::Storage};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub data: Arc<AppData>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Carrega os dados em memória a partir do armazenamento.
    pub async fn new(storage: Arc<Storage>, config: Config) -> crate::error::AppResult<Self> {
        let data = Arc::new(AppData::load(storage.clone()).await?);
        Ok(Self {
            storage,
            data,
            config: Arc::new(config),
        })
    }
}
