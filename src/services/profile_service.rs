// src/services/profile_service.rs
use crate::{
    error::{AppError, AppResult},
    keys,
    models::settings::AthleteSettings,
    store::Storage,
};

pub async fn get_profile_image(storage: &Storage, user_id: &str) -> AppResult<Option<String>> {
    storage.get_json(&keys::profile_image(user_id)).await
}

/// Guarda a foto de perfil (data URI de imagem em base64).
pub async fn set_profile_image(storage: &Storage, user_id: &str, data_uri: &str) -> AppResult<()> {
    let data_uri = data_uri.trim();
    if !data_uri.starts_with("data:image/") || !data_uri.contains(";base64,") {
        return Err(AppError::Validation(
            "a imagem deve ser um data URI base64 (data:image/...;base64,...)".into(),
        ));
    }
    storage.set_json(&keys::profile_image(user_id), data_uri).await?;
    tracing::info!("🖼️ Foto de perfil atualizada para {} ({} bytes).", user_id, data_uri.len());
    Ok(())
}

pub async fn remove_profile_image(storage: &Storage, user_id: &str) -> AppResult<()> {
    storage.remove(&keys::profile_image(user_id)).await
}

/// Preferências do atleta; valores por omissão se nunca foram gravadas.
pub async fn get_settings(storage: &Storage, user_id: &str) -> AppResult<AthleteSettings> {
    Ok(storage
        .get_json(&keys::athlete_settings(user_id))
        .await?
        .unwrap_or_default())
}

pub async fn save_settings(
    storage: &Storage,
    user_id: &str,
    settings: &AthleteSettings,
) -> AppResult<()> {
    storage.set_json(&keys::athlete_settings(user_id), settings).await?;
    tracing::debug!("Preferências gravadas para {}: {:?}", user_id, settings);
    Ok(())
}
