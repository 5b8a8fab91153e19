// src/services/orientacao_service.rs
use crate::{
    error::{AppError, AppResult},
    keys,
    models::{
        orientacao::{NovaOrientacao, NovoFeedback, Orientacao, TIPO_FEEDBACK},
        player::{Feedback, Player},
        user::{PublicUser, UserType},
    },
    services::{app_data::AppData, user_service},
    store::Storage,
};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

/// Resultado do envio de um feedback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEnviado {
    pub player: Player,
    /// `None` quando o jogador não está ligado a nenhum atleta.
    pub orientacao: Option<Orientacao>,
}

/// Orientações do atleta, das mais recentes para as mais antigas.
pub async fn list_orientacoes(storage: &Storage, user_id: &str) -> AppResult<Vec<Orientacao>> {
    let mut lista: Vec<Orientacao> = storage.get_list(&keys::orientacoes(user_id)).await?;
    lista.sort_by(|a, b| b.data.cmp(&a.data));
    tracing::debug!("{} orientações para o utilizador {}", lista.len(), user_id);
    Ok(lista)
}

pub async fn count_unread(storage: &Storage, user_id: &str) -> AppResult<usize> {
    let lista: Vec<Orientacao> = storage.get_list(&keys::orientacoes(user_id)).await?;
    Ok(lista.iter().filter(|o| !o.lida).count())
}

/// Acrescenta uma orientação à lista do atleta.
pub async fn add_orientacao(
    storage: &Storage,
    user_id: &str,
    nova: NovaOrientacao,
    professor: Option<&str>,
) -> AppResult<Orientacao> {
    nova.validate()?;
    let orientacao = Orientacao {
        id: Uuid::new_v4().to_string(),
        tipo: nova.tipo.trim().to_string(),
        titulo: nova.titulo.trim().to_string(),
        descricao: nova.descricao,
        data: Utc::now(),
        lida: false,
        professor: professor.map(str::to_string),
    };
    let nova_entrada = orientacao.clone();
    storage
        .update_list::<Orientacao, _, _>(&keys::orientacoes(user_id), move |lista| {
            lista.push(nova_entrada);
            Ok(())
        })
        .await?;
    tracing::info!("📨 Orientação '{}' enviada ao utilizador {}.", orientacao.titulo, user_id);
    Ok(orientacao)
}

/// Envia uma orientação a um atleta existente.
pub async fn send_to_athlete(
    storage: &Storage,
    athlete_id: &str,
    nova: NovaOrientacao,
    professor: &PublicUser,
) -> AppResult<Orientacao> {
    let atleta = user_service::find_user_by_id(storage, athlete_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("utilizador {athlete_id}")))?;
    if atleta.user_type != UserType::Atleta {
        return Err(AppError::Validation(format!(
            "o utilizador {athlete_id} não é um atleta"
        )));
    }
    add_orientacao(storage, athlete_id, nova, Some(&professor.name)).await
}

/// Marca uma orientação como lida.
pub async fn mark_as_read(storage: &Storage, user_id: &str, orientacao_id: &str) -> AppResult<Orientacao> {
    let id = orientacao_id.to_string();
    storage
        .update_list::<Orientacao, _, _>(&keys::orientacoes(user_id), move |lista| {
            let orientacao = lista
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| AppError::NotFound(format!("orientação {id}")))?;
            orientacao.lida = true;
            Ok(orientacao.clone())
        })
        .await
}

/// Feedbacks de um jogador guardados no mapa global.
pub async fn feedbacks_for(storage: &Storage, player_id: &str) -> AppResult<Vec<Feedback>> {
    let mapa: BTreeMap<String, Vec<Feedback>> =
        storage.get_json(keys::FEEDBACKS).await?.unwrap_or_default();
    Ok(mapa.get(player_id).cloned().unwrap_or_default())
}

/// Regista o feedback no jogador e encaminha-o como orientação ao atleta ligado.
///
/// São escritas independentes: se a última falhar, as anteriores ficam gravadas.
pub async fn send_feedback(
    storage: &Storage,
    data: &AppData,
    player_id: &str,
    novo: NovoFeedback,
    professor: &PublicUser,
) -> AppResult<FeedbackEnviado> {
    novo.validate()?;
    let feedback = Feedback {
        mensagem: novo.mensagem.trim().to_string(),
        data: Utc::now(),
        professor: professor.name.clone(),
    };

    let player = data.append_player_feedback(player_id, feedback.clone()).await?;

    let pid = player_id.to_string();
    let entrada = feedback.clone();
    storage
        .update_json::<BTreeMap<String, Vec<Feedback>>, _, _>(keys::FEEDBACKS, move |mapa| {
            mapa.entry(pid).or_default().push(entrada);
            Ok(())
        })
        .await?;

    let orientacao = match &player.user_id {
        Some(user_id) => {
            let nova = NovaOrientacao {
                tipo: TIPO_FEEDBACK.to_string(),
                titulo: format!("Feedback de {}", professor.name),
                descricao: feedback.mensagem.clone(),
            };
            Some(add_orientacao(storage, user_id, nova, Some(&professor.name)).await?)
        }
        None => {
            tracing::debug!("Jogador '{}' sem atleta ligado; feedback não encaminhado.", player_id);
            None
        }
    };

    Ok(FeedbackEnviado { player, orientacao })
}
