// src/main.rs

// --- Declaração dos Módulos ---
mod config;
mod db;
mod error;
mod keys;
mod models;
mod retry;
mod services;
mod state;
mod store;
mod templates;
mod web;

#[cfg(test)]
mod test;

// --- Imports ---
use crate::{
    config::Config,
    db::SqliteKvStore,
    services::auth_service,
    state::AppState,
    store::Storage,
};
use axum::serve;
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                env::var("RUST_LOG")
                    .unwrap_or_else(|_| "gestao_times=debug,tower_http=info,sqlx=warn".into())
                    .into()
            }),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando servidor Gestão de Times...");

    // --- Configuração do Armazenamento ---
    let db_pool = match db::create_db_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar o armazenamento: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
        }
    };
    let storage = Arc::new(Storage::new(
        Arc::new(SqliteKvStore::new(db_pool)),
        config.retry,
    ));

    // --- Criação do Estado da Aplicação ---
    let addr = config.bind_addr;
    let seed_admin = config.seed_admin;
    let app_state = AppState::new(storage, config).await?;

    if seed_admin && auth_service::seed_default_admin(&app_state.storage, &app_state.data).await? {
        tracing::info!("👤 Professor padrão '{}' criado.", auth_service::DEFAULT_ADMIN_EMAIL);
    }

    // --- Configuração do Endereço e Listener ---
    tracing::info!("📡 Servidor escutando em http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", addr, e);
            return Err(e.into());
        }
    };

    // --- Criação do Router e Aplicação das Camadas (Middlewares) ---
    let app = web::routes::create_router(app_state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    // --- Início do Servidor ---
    tracing::info!("👂 Servidor pronto para aceitar conexões...");
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
