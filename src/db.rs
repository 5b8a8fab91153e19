// src/db.rs
use crate::{error::AppResult, store::KeyValueStore};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration; // Usar std::time::Duration aqui

pub async fn create_db_pool(database_url: &str) -> AppResult<SqlitePool> {
    tracing::info!("Ligando à base de dados: {}", database_url);

    // Opções de conexão (criar se não existir, timeout)
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Pool com uma única conexão para `sqlite::memory:` (cada conexão teria a sua própria base).
#[cfg(test)]
pub async fn create_memory_pool() -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    tracing::info!("Executando migrações da base de dados...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrações concluídas.");
    Ok(())
}

/// Armazenamento chave-valor persistente numa tabela SQLite.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
               value = excluded.value,
               updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        let removidas = sqlx::query("DELETE FROM kv_store")
            .execute(&self.pool)
            .await?
            .rows_affected();
        tracing::debug!("{} chave(s) removidas.", removidas);
        Ok(())
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM kv_store ORDER BY key ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}
