// src/retry.rs
use crate::error::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;

/// Política de novas tentativas para escritas no armazenamento.
///
/// O atraso cresce exponencialmente a partir de `base_delay` e fica limitado a `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Espera antes da tentativa seguinte a `attempt` (1 = primeira falha).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let expoente = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << expoente)
            .min(self.max_delay)
    }
}

/// Executa `op` até ter sucesso, repetindo apenas erros transitórios.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operacao: &str, mut op: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut tentativa = 1;

    loop {
        match op().await {
            Ok(valor) => {
                if tentativa > 1 {
                    tracing::info!("{} concluída na tentativa {}.", operacao, tentativa);
                }
                return Ok(valor);
            }
            Err(e) if e.is_transient() && tentativa < max_attempts => {
                let espera = policy.delay_for(tentativa);
                tracing::warn!(
                    "{} falhou (tentativa {}/{}): {}. Nova tentativa em {:?}",
                    operacao,
                    tentativa,
                    max_attempts,
                    e,
                    espera
                );
                tokio::time::sleep(espera).await;
                tentativa += 1;
            }
            Err(e) => {
                tracing::error!("{} falhou definitivamente após {} tentativa(s): {}", operacao, tentativa, e);
                return Err(e);
            }
        }
    }
}

/// Erro transitório usado quando uma escrita não pôde ser confirmada.
pub fn unconfirmed_write(chave: &str) -> AppError {
    AppError::IoError(std::io::Error::other(format!(
        "escrita em '{chave}' não confirmada"
    )))
}
