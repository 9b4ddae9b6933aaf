use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    entity::users::Model as UserModel,
    error::{AppError, AppResult},
    middleware::token::Claims,
    models::Role,
    services::user_service,
    state::AppState,
};

/// Authenticated caller, re-resolved from the user store on every request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserModel);

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }
}

/// Caller whose token carries the admin role. The store is not consulted.
#[derive(Debug, Clone)]
pub struct AdminClaims(pub Claims);

pub fn ensure_role(claims: &Claims, role: Role) -> AppResult<()> {
    if claims.role != role {
        return Err(AppError::Unauthorized(
            "you're not authorized to access this endpoint".into(),
        ));
    }
    Ok(())
}

/// Ownership gate for customer resources.
pub fn ensure_owner(user: &CurrentUser, owner_id: i32, resource: &str) -> AppResult<()> {
    if user.id() != owner_id {
        return Err(AppError::Unauthorized(format!(
            "you're not authorized to access this {resource}"
        )));
    }
    Ok(())
}

fn bearer_claims(parts: &Parts, state: &AppState) -> AppResult<Claims> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthenticated("invalid token".into()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthenticated("invalid token".into()))?;

    state.tokens.verify_header(auth_str)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;

        let user = user_service::find_by_email(&state.orm, &claims.email)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "authenticated user lookup failed");
                AppError::Unauthenticated("invalid token".into())
            })?
            .ok_or_else(|| AppError::Unauthenticated("invalid token".into()))?;

        Ok(CurrentUser(user))
    }
}

impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        ensure_role(&claims, Role::Admin)?;
        Ok(AdminClaims(claims))
    }
}
