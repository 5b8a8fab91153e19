// src/web/mw_professor.rs
use crate::{error::AppError, web::mw_auth::CurrentUser};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Middleware que só deixa passar professores.
/// Deve ser executado *depois* do middleware `require_auth`.
pub async fn require_professor(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.is_professor() {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Professor MW: Acesso negado para {} (atleta).", user.id);
        Err(AppError::Forbidden("apenas professores".into()))
    }
}
