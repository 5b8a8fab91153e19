// src/store.rs
use crate::{
    error::{AppError, AppResult},
    retry::{self, RetryPolicy},
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
#[cfg(test)]
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU32, Ordering},
};
#[cfg(test)]
use tokio::sync::RwLock;

/// Armazenamento chave-valor assíncrono, com valores em texto (JSON).
///
/// Não há transações nem escritas em lote: cada coleção vive num único valor
/// e cada escrita substitui o valor inteiro.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
    async fn remove_item(&self, key: &str) -> AppResult<()>;
    async fn clear(&self) -> AppResult<()>;
    /// Lista todas as chaves (ordenadas). Usado pelo diagnóstico.
    async fn keys(&self) -> AppResult<Vec<String>>;
}

/// Implementação em memória, usada nos testes.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    items: RwLock<HashMap<String, String>>,
    failing_writes: AtomicU32,
    failing_keys: std::sync::Mutex<HashMap<String, u32>>,
}

#[cfg(test)]
impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faz as próximas `n` escritas falharem com um erro transitório.
    pub fn fail_next_writes(&self, n: u32) {
        self.failing_writes.store(n, Ordering::SeqCst);
    }

    /// Como `fail_next_writes`, mas só para escritas em `key`.
    pub fn fail_next_writes_to(&self, key: &str, n: u32) {
        if let Ok(mut chaves) = self.failing_keys.lock() {
            chaves.insert(key.to_string(), n);
        }
    }

    fn take_failure(&self, key: &str) -> bool {
        let restantes = self.failing_writes.load(Ordering::SeqCst);
        if restantes > 0 {
            self.failing_writes.store(restantes - 1, Ordering::SeqCst);
            return true;
        }
        match self.failing_keys.lock() {
            Ok(mut chaves) => match chaves.get_mut(key) {
                Some(n) if *n > 0 => {
                    *n -= 1;
                    true
                }
                _ => false,
            },
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        if self.take_failure(key) {
            return Err(retry::unconfirmed_write(key));
        }
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.items.write().await.clear();
        Ok(())
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        let mut keys: Vec<String> = self.items.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Fachada tipada sobre um `KeyValueStore`.
///
/// Serializa as operações de leitura-modificação-escrita com um único lock de
/// escrita e aplica a política de novas tentativas a todas as escritas.
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
    retry: RetryPolicy,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>, retry: RetryPolicy) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
            retry,
        }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Lê e desserializa um valor. `None` se a chave não existir.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.backend.get_item(key).await? {
            Some(raw) => {
                let valor = serde_json::from_str(&raw).map_err(|e| {
                    tracing::error!("Valor corrompido em '{}': {}", key, e);
                    AppError::SerdeError(e)
                })?;
                Ok(Some(valor))
            }
            None => Ok(None),
        }
    }

    /// Lê uma coleção; uma chave inexistente é uma coleção vazia.
    pub async fn get_list<T: DeserializeOwned>(&self, key: &str) -> AppResult<Vec<T>> {
        Ok(self.get_json(key).await?.unwrap_or_default())
    }

    /// Substitui o valor inteiro da chave.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let payload = serde_json::to_string(value)?;
        let _guard = self.write_lock.lock().await;
        self.write_raw(key, &payload).await
    }

    /// Leitura-modificação-escrita de um valor sob o lock de escrita.
    ///
    /// Se `f` devolver erro nada é escrito.
    pub async fn update_json<T, R, F>(&self, key: &str, f: F) -> AppResult<R>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> AppResult<R>,
    {
        let _guard = self.write_lock.lock().await;
        let mut valor: T = self.get_json(key).await?.unwrap_or_default();
        let resultado = f(&mut valor)?;
        let payload = serde_json::to_string(&valor)?;
        self.write_raw(key, &payload).await?;
        Ok(resultado)
    }

    /// Atalho de `update_json` para coleções.
    pub async fn update_list<T, R, F>(&self, key: &str, f: F) -> AppResult<R>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(&mut Vec<T>) -> AppResult<R>,
    {
        self.update_json::<Vec<T>, R, F>(key, f).await
    }

    pub async fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let backend = &self.backend;
        retry::with_retry(&self.retry, "Remoção de chave", move || backend.remove_item(key)).await
    }

    pub async fn keys(&self) -> AppResult<Vec<String>> {
        self.backend.keys().await
    }

    // Chamado sempre com o lock de escrita adquirido.
    async fn write_raw(&self, key: &str, payload: &str) -> AppResult<()> {
        let backend = &self.backend;
        tracing::debug!("Gravando '{}' ({} bytes)", key, payload.len());
        retry::with_retry(&self.retry, "Escrita no armazenamento", move || {
            backend.set_item(key, payload)
        })
        .await
    }
}
