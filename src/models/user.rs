// src/models/user.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Professor,
    Atleta,
}

/// Utilizador guardado na lista `@GestaoTimes:users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Jogador criado no registo de um atleta (chave estrangeira explícita).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Utilizador sem o hash da senha. É o que fica guardado como sessão
/// e o que sai pela API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

impl PublicUser {
    pub fn is_professor(&self) -> bool {
        self.user_type == UserType::Professor
    }
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            user_type: user.user_type,
            professor_id: user.professor_id.clone(),
            sport: user.sport.clone(),
            position: user.position.clone(),
            player_id: user.player_id.clone(),
        }
    }
}

// Dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    #[validate(custom(function = "crate::models::not_blank", message = "o nome é obrigatório"))]
    pub name: String,
    #[validate(email(message = "email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "a senha deve ter pelo menos 6 caracteres"))]
    pub password: String,
    pub user_type: UserType,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub professor_id: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Alteração parcial do perfil. Campos ausentes ficam como estão.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(custom(function = "crate::models::not_blank", message = "o nome não pode ficar vazio"))]
    pub name: Option<String>,
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub sport: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    #[validate(length(min = 6, message = "a senha deve ter pelo menos 6 caracteres"))]
    pub new_password: String,
}
