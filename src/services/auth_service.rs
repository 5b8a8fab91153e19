// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    keys,
    models::{
        non_blank,
        player::{NewPlayer, PlayerPatch},
        user::{PasswordChange, ProfileUpdate, PublicUser, SignUpForm, User, UserType},
    },
    services::{app_data::AppData, user_service},
    store::Storage,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

// Custo baixo nos testes para não tornar a suite lenta.
const BCRYPT_COST: u32 = if cfg!(test) { 4 } else { bcrypt::DEFAULT_COST };

/// Conta de professor criada no primeiro arranque.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@teste.com";
const DEFAULT_ADMIN_PASSWORD: &str = "123456";

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &stored_hash))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
            AppError::PasswordHashingError
        })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, BCRYPT_COST))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
            AppError::PasswordHashingError
        })
}

/// Sessão atual, se houver alguém autenticado.
pub async fn current_user(storage: &Storage) -> AppResult<Option<PublicUser>> {
    storage.get_json(keys::SESSAO).await
}

/// Autentica por email e senha e grava o utilizador como sessão atual.
pub async fn sign_in(storage: &Storage, email: &str, password: &str) -> AppResult<PublicUser> {
    tracing::info!("Tentativa de login para: {}", email);

    let user = match user_service::find_user_by_email(storage, email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Utilizador não encontrado: {}", email);
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash).await? {
        tracing::warn!("Senha incorreta para: {}", email);
        return Err(AppError::InvalidCredentials);
    }

    let sessao = PublicUser::from(&user);
    storage.set_json(keys::SESSAO, &sessao).await?;
    tracing::info!("✅ Login bem-sucedido para: {}", user.id);
    Ok(sessao)
}

/// Regista um novo utilizador sem alterar a sessão.
///
/// Para um atleta com modalidade e posição definidas é também criado o jogador
/// correspondente, ligado por `userId` / `playerId`.
pub async fn register_user(storage: &Storage, data: &AppData, form: SignUpForm) -> AppResult<User> {
    form.validate()?;
    let email = user_service::normalize_email(&form.email);
    tracing::info!("Registando utilizador: {}", email);

    let password_hash = hash_password(&form.password).await?;
    let now = Utc::now();
    let mut user = User {
        id: Uuid::new_v4().to_string(),
        name: form.name.trim().to_string(),
        email,
        password_hash,
        avatar: non_blank(form.avatar),
        user_type: form.user_type,
        professor_id: non_blank(form.professor_id),
        sport: non_blank(form.sport),
        position: non_blank(form.position),
        player_id: None,
        created_at: now,
        updated_at: now,
    };

    if user_service::find_user_by_email(storage, &user.email).await?.is_some() {
        tracing::warn!("Registo recusado: email '{}' já existe.", user.email);
        return Err(AppError::DuplicateEmail(user.email.clone()));
    }

    // O jogador vem antes do utilizador: uma falha aqui não deixa conta a meio
    let mut jogador_criado = None;
    if user.user_type == UserType::Atleta {
        if let (Some(sport), Some(position)) = (user.sport.clone(), user.position.clone()) {
            let player = data
                .add_player(NewPlayer {
                    name: user.name.clone(),
                    sport,
                    position,
                    team_id: String::new(),
                    user_id: Some(user.id.clone()),
                    profile: None,
                })
                .await?;
            if let Err(e) = data.confirm_player_stored(&player.id).await {
                discard_player(data, &player.id).await;
                return Err(e);
            }
            user.player_id = Some(player.id.clone());
            jogador_criado = Some(player.id);
        }
    }

    // Verificação de unicidade e inserção sob o mesmo lock de escrita
    let novo = user.clone();
    let inserido = storage
        .update_list::<User, _, _>(keys::USERS, move |users| {
            if user_service::email_taken(users, &novo.email, None) {
                tracing::warn!("Registo recusado: email '{}' já existe.", novo.email);
                return Err(AppError::DuplicateEmail(novo.email.clone()));
            }
            users.push(novo);
            Ok(())
        })
        .await;

    if let Err(e) = inserido {
        if let Some(player_id) = &jogador_criado {
            discard_player(data, player_id).await;
        }
        return Err(e);
    }
    if let Some(player_id) = &jogador_criado {
        tracing::info!("Jogador '{}' criado para o atleta '{}'.", player_id, user.id);
    }

    tracing::info!("✅ Utilizador '{}' criado com sucesso.", user.id);
    Ok(user)
}

/// Regista e autentica o novo utilizador.
pub async fn sign_up(storage: &Storage, data: &AppData, form: SignUpForm) -> AppResult<PublicUser> {
    let user = register_user(storage, data, form).await?;
    let sessao = PublicUser::from(&user);
    storage.set_json(keys::SESSAO, &sessao).await?;
    Ok(sessao)
}

/// Termina a sessão. Só a chave da sessão é apagada.
pub async fn sign_out(storage: &Storage) -> AppResult<()> {
    if let Some(user) = current_user(storage).await? {
        tracing::info!("🚪 Utilizador '{}' desligado.", user.id);
    }
    storage.remove(keys::SESSAO).await
}

/// Atualiza nome, email, avatar, modalidade e posição.
pub async fn update_profile(
    storage: &Storage,
    data: &AppData,
    user_id: &str,
    patch: ProfileUpdate,
) -> AppResult<PublicUser> {
    patch.validate()?;
    tracing::info!("Atualizando perfil do utilizador: {}", user_id);

    let id = user_id.to_string();
    let sport = non_blank(patch.sport);
    let position = non_blank(patch.position);
    let (nome, esporte, posicao) = (patch.name.clone(), sport.clone(), position.clone());

    let atualizado = storage
        .update_list::<User, _, _>(keys::USERS, move |users| {
            if let Some(email) = &patch.email {
                if user_service::email_taken(users, email, Some(&id)) {
                    return Err(AppError::DuplicateEmail(user_service::normalize_email(email)));
                }
            }
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| AppError::NotFound(format!("utilizador {id}")))?;

            if let Some(name) = patch.name {
                user.name = name.trim().to_string();
            }
            if let Some(email) = patch.email {
                user.email = user_service::normalize_email(&email);
            }
            if let Some(avatar) = patch.avatar {
                user.avatar = non_blank(Some(avatar));
            }
            if sport.is_some() {
                user.sport = sport;
            }
            if position.is_some() {
                user.position = position;
            }
            user.updated_at = Utc::now();
            Ok(user.clone())
        })
        .await?;

    // Espelha no jogador ligado os campos partilhados
    if let Some(player_id) = &atualizado.player_id {
        let espelho = PlayerPatch {
            name: nome.map(|n| n.trim().to_string()),
            sport: esporte,
            position: posicao,
            ..PlayerPatch::default()
        };
        match data.update_player(player_id, espelho).await {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                tracing::warn!("Jogador '{}' ligado ao utilizador '{}' já não existe.", player_id, user_id);
            }
            Err(e) => return Err(e),
        }
    }

    let publico = PublicUser::from(&atualizado);
    refresh_session(storage, &publico).await?;
    tracing::info!("✅ Perfil atualizado para: {}", user_id);
    Ok(publico)
}

/// Altera a senha depois de confirmar a senha atual.
pub async fn update_password(storage: &Storage, user_id: &str, change: PasswordChange) -> AppResult<()> {
    change.validate()?;
    tracing::info!("Tentando alterar senha para user: {}", user_id);

    let user = user_service::find_user_by_id(storage, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("utilizador {user_id}")))?;

    if !verify_password(&change.current_password, &user.password_hash).await? {
        tracing::warn!("Senha atual incorreta para: {}", user_id);
        return Err(AppError::InvalidCredentials);
    }

    let novo_hash = hash_password(&change.new_password).await?;
    let id = user_id.to_string();
    let atualizado = storage
        .update_list::<User, _, _>(keys::USERS, move |users| {
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| AppError::NotFound(format!("utilizador {id}")))?;
            user.password_hash = novo_hash;
            user.updated_at = Utc::now();
            Ok(user.clone())
        })
        .await?;

    refresh_session(storage, &PublicUser::from(&atualizado)).await?;
    tracing::info!("✅ Senha alterada com sucesso para user: {}", user_id);
    Ok(())
}

/// Cria a conta de professor padrão se ainda não existir nenhum utilizador.
pub async fn seed_default_admin(storage: &Storage, data: &AppData) -> AppResult<bool> {
    if !user_service::find_all_users(storage).await?.is_empty() {
        return Ok(false);
    }
    tracing::warn!(
        "⚠️ Nenhum utilizador encontrado. Criando professor padrão '{}'; altere a senha.",
        DEFAULT_ADMIN_EMAIL
    );
    register_user(
        storage,
        data,
        SignUpForm {
            name: "Administrador".to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            user_type: UserType::Professor,
            avatar: None,
            professor_id: None,
            sport: None,
            position: None,
        },
    )
    .await?;
    Ok(true)
}

// Desfaz o jogador de um registo que não chegou ao fim.
async fn discard_player(data: &AppData, player_id: &str) {
    if let Err(e) = data.delete_player(player_id).await {
        tracing::error!("❌ Não foi possível remover o jogador órfão '{}': {}", player_id, e);
    }
}

// A sessão guarda uma cópia do utilizador; mantém-na em dia se for o mesmo.
async fn refresh_session(storage: &Storage, user: &PublicUser) -> AppResult<()> {
    match current_user(storage).await? {
        Some(sessao) if sessao.id == user.id => storage.set_json(keys::SESSAO, user).await,
        _ => Ok(()),
    }
}
