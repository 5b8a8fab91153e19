// src/web/mw_auth.rs
use crate::{error::AppError, models::user::PublicUser, services::auth_service, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

// Middleware que verifica se existe uma sessão ativa
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match auth_service::current_user(&state.storage).await {
        Ok(Some(user)) => {
            tracing::debug!("Autenticação MW: Utilizador '{}' autenticado.", user.id);
            // Os handlers protegidos leem o utilizador das extensões
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Autenticação MW: Sem sessão ativa.");
            Err(AppError::Unauthorized)
        }
        Err(e) => {
            tracing::error!("Autenticação MW: Erro ao ler sessão: {:?}", e);
            Err(e)
        }
    }
}

/// Utilizador da sessão, posto nas extensões por `require_auth`.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub PublicUser);
