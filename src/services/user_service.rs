// src/services/user_service.rs
use crate::{error::AppResult, keys, models::user::User, store::Storage};

/// Normaliza o email para comparação e armazenamento.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Verifica se o email já pertence a outro utilizador (sem distinguir maiúsculas).
pub fn email_taken(users: &[User], email: &str, except_id: Option<&str>) -> bool {
    let email = normalize_email(email);
    users
        .iter()
        .filter(|u| Some(u.id.as_str()) != except_id)
        .any(|u| normalize_email(&u.email) == email)
}

/// Busca todos os utilizadores guardados.
pub async fn find_all_users(storage: &Storage) -> AppResult<Vec<User>> {
    let users: Vec<User> = storage.get_list(keys::USERS).await?;
    tracing::debug!("Encontrados {} utilizadores.", users.len());
    Ok(users)
}

/// Busca um utilizador pelo seu ID.
pub async fn find_user_by_id(storage: &Storage, user_id: &str) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por ID: {}", user_id);
    let user = find_all_users(storage)
        .await?
        .into_iter()
        .find(|u| u.id == user_id);
    Ok(user)
}

/// Busca um utilizador pelo email (sem distinguir maiúsculas).
pub async fn find_user_by_email(storage: &Storage, email: &str) -> AppResult<Option<User>> {
    let email = normalize_email(email);
    let user = find_all_users(storage)
        .await?
        .into_iter()
        .find(|u| normalize_email(&u.email) == email);

    if user.is_none() {
        tracing::debug!("Nenhum utilizador com o email '{}'.", email);
    }
    Ok(user)
}

/// Atletas ligados a um professor.
pub async fn find_athletes_of(storage: &Storage, professor_id: &str) -> AppResult<Vec<User>> {
    let atletas = find_all_users(storage)
        .await?
        .into_iter()
        .filter(|u| u.professor_id.as_deref() == Some(professor_id))
        .collect();
    Ok(atletas)
}
