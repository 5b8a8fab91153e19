// src/config.rs
use crate::{
    error::{AppError, AppResult},
    retry::RetryPolicy,
};
use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

/// Configuração da aplicação, lida de variáveis de ambiente (e de `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub backup_dir: PathBuf,
    pub retry: RetryPolicy,
    /// Cria a conta de professor padrão quando ainda não há utilizadores.
    pub seed_admin: bool,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok(); // Carrega .env, se existir
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Constrói a configuração a partir de uma função de consulta (útil em testes).
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://gestao_times.db".to_string());
        let bind_addr = parse_var(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let backup_dir = lookup("BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./backups"));

        let defaults = RetryPolicy::default();
        let max_attempts = parse_var(&lookup, "STORE_RETRY_ATTEMPTS", defaults.max_attempts)?;
        if max_attempts == 0 {
            return Err(AppError::ConfigError(
                "STORE_RETRY_ATTEMPTS deve ser pelo menos 1".into(),
            ));
        }
        let base_ms = parse_var(
            &lookup,
            "STORE_RETRY_BASE_MS",
            defaults.base_delay.as_millis() as u64,
        )?;

        let seed_admin = parse_var(&lookup, "SEED_ADMIN", true)?;

        Ok(Self {
            database_url,
            bind_addr,
            backup_dir,
            retry: RetryPolicy {
                max_attempts,
                base_delay: Duration::from_millis(base_ms),
                max_delay: defaults.max_delay,
            },
            seed_admin,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::ConfigError(format!("valor inválido para {name}: '{raw}'"))
        }),
        None => Ok(default),
    }
}
