// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro no armazenamento: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de serialização: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Configuração inválida: {0}")]
    ConfigError(String),

    #[error("Erro de E/S: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Erro ao gerar arquivo zip: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Erro ao renderizar template: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Email já cadastrado: {0}")]
    DuplicateEmail(String),

    #[error("Não encontrado: {0}")]
    NotFound(String),

    #[error("Dados inválidos: {0}")]
    Validation(String),

    #[error("Não autorizado")]
    Unauthorized,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Junta "campo: mensagem" numa única linha legível
        let detalhes = errors
            .field_errors()
            .iter()
            .flat_map(|(campo, erros)| {
                erros.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "valor inválido".to_string());
                    format!("{campo}: {msg}")
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(detalhes)
    }
}

impl AppError {
    /// Falhas que podem desaparecer numa nova tentativa (armazenamento ocupado, E/S).
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::SqlxError(sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut) => true,
            AppError::SqlxError(sqlx::Error::Database(e)) => sqlite_busy_or_locked(e.code().as_deref()),
            AppError::IoError(_) => true,
            _ => false,
        }
    }

    /// Identificador curto do tipo de erro, devolvido no corpo JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => "armazenamento",
            AppError::SerdeError(_) => "serializacao",
            AppError::ConfigError(_) => "configuracao",
            AppError::IoError(_) | AppError::ZipError(_) => "arquivo",
            AppError::TemplateError(_) => "template",
            AppError::PasswordHashingError => "password",
            AppError::InvalidCredentials => "credenciais",
            AppError::DuplicateEmail(_) => "email_duplicado",
            AppError::NotFound(_) => "nao_encontrado",
            AppError::Validation(_) => "validacao",
            AppError::Unauthorized => "nao_autenticado",
            AppError::Forbidden(_) => "acesso_negado",
            AppError::InternalServerError => "interno",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// SQLITE_BUSY (5) e SQLITE_LOCKED (6), incluindo os códigos estendidos.
fn sqlite_busy_or_locked(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .is_some_and(|c| matches!(c & 0xff, 5 | 6))
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Erro processado: {:?}", self);
        } else {
            tracing::warn!("Pedido rejeitado: {}", self);
        }

        // Erros internos não expõem detalhes ao cliente
        let mensagem = match &self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                "Não foi possível aceder aos dados.".to_string()
            }
            AppError::ConfigError(_) => "Erro de configuração.".to_string(),
            AppError::PasswordHashingError => "Erro ao processar credenciais.".to_string(),
            AppError::InvalidCredentials => "Email ou senha inválidos.".to_string(),
            _ if status.is_server_error() => "Ocorreu um erro inesperado.".to_string(),
            outro => outro.to_string(),
        };

        (
            status,
            Json(json!({ "erro": self.kind(), "mensagem": mensagem })),
        )
            .into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
