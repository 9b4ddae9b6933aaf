use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use axum::http::StatusCode;
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    config::AdminSeed,
    db::{DbPool, is_unique_violation},
    dto::users::{ChangePasswordRequest, ModifyUserRequest, SignInRequest, SignUpRequest, TokenResponse},
    entity::users::{ActiveModel, Column, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::CurrentUser,
    models::{Role, UserProfile},
    response::ApiResponse,
    state::AppState,
};

const EMAIL_CONSTRAINT: &str = "users_email_key";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(e.to_string()))
}

pub fn verify_password(password_hash: &str, password: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::error!(error = %err, "stored password hash is unreadable");
            false
        }
    }
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<UserModel>, DbErr> {
    Users::find()
        .filter(Column::Email.eq(email))
        .filter(Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn sign_up(state: &AppState, payload: SignUpRequest) -> AppResult<ApiResponse<()>> {
    let SignUpRequest {
        full_name,
        email,
        password,
    } = payload;

    let password_hash = hash_password(&password)?;

    let active = ActiveModel {
        id: NotSet,
        full_name: Set(full_name),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(Role::Customer.as_str().to_string()),
        address: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
        deleted_at: NotSet,
    };

    match active.insert(&state.orm).await {
        Ok(user) => tracing::info!(user_id = user.id, "user signed up"),
        Err(err) if is_unique_violation(&err, EMAIL_CONSTRAINT) => {
            return Err(AppError::Conflict("email has been used".into()));
        }
        Err(err) => return Err(err.into()),
    }

    Ok(ApiResponse::command(
        StatusCode::CREATED,
        "user successfully sign up",
    ))
}

pub async fn sign_in(
    state: &AppState,
    payload: SignInRequest,
) -> AppResult<ApiResponse<TokenResponse>> {
    let SignInRequest { email, password } = payload;

    let user = match find_by_email(&state.orm, &email).await? {
        Some(u) => u,
        None => return Err(AppError::BadRequest("invalid email/password".into())),
    };

    if !verify_password(&user.password_hash, &password) {
        return Err(AppError::BadRequest("invalid email/password".into()));
    }

    let role = stored_role(&user)?;
    let token = state.tokens.issue(&user.email, role)?;

    Ok(ApiResponse::success(
        "user successfully sign in",
        TokenResponse { token },
    ))
}

pub fn profile(user: &CurrentUser) -> AppResult<ApiResponse<UserProfile>> {
    let profile = profile_from_entity(&user.0)?;
    Ok(ApiResponse::success("user successfully fetched", profile))
}

pub async fn modify(
    state: &AppState,
    user: &CurrentUser,
    payload: ModifyUserRequest,
) -> AppResult<ApiResponse<()>> {
    let mut active: ActiveModel = user.0.clone().into();
    active.full_name = Set(payload.full_name);
    active.email = Set(payload.email);
    active.address = Set(payload.address);
    active.updated_at = Set(Utc::now().into());

    match active.update(&state.orm).await {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err, EMAIL_CONSTRAINT) => {
            return Err(AppError::Conflict("email has been used".into()));
        }
        Err(err) => return Err(err.into()),
    }

    Ok(ApiResponse::command(
        StatusCode::OK,
        "user successfully modified",
    ))
}

pub async fn change_password(
    state: &AppState,
    user: &CurrentUser,
    payload: ChangePasswordRequest,
) -> AppResult<ApiResponse<()>> {
    if !verify_password(&user.0.password_hash, &payload.old_password) {
        return Err(AppError::BadRequest("old password is incorrect".into()));
    }
    if payload.new_password != payload.confirm_new_password {
        return Err(AppError::BadRequest("password didn't match".into()));
    }

    let mut active: ActiveModel = user.0.clone().into();
    active.password_hash = Set(hash_password(&payload.new_password)?);
    active.updated_at = Set(Utc::now().into());
    active.update(&state.orm).await?;

    Ok(ApiResponse::command(
        StatusCode::OK,
        "password successfully changed",
    ))
}

/// Create the configured administrator if no account holds its email yet.
///
/// An existing account is never promoted or given a new password: if the
/// email belongs to a non-admin the bootstrap is refused.
pub async fn ensure_admin(pool: &DbPool, seed: &AdminSeed) -> AppResult<i32> {
    let password_hash = hash_password(&seed.password)?;

    let inserted: Option<(i32,)> = sqlx::query_as(
        r#"
        INSERT INTO users (full_name, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(&seed.full_name)
    .bind(&seed.email)
    .bind(password_hash)
    .bind(Role::Admin.as_str())
    .fetch_optional(pool)
    .await?;

    if let Some((id,)) = inserted {
        tracing::info!(user_id = id, email = %seed.email, "admin account created");
        return Ok(id);
    }

    let (id, role): (i32, String) = sqlx::query_as("SELECT id, role FROM users WHERE email = $1")
        .bind(&seed.email)
        .fetch_one(pool)
        .await?;

    if Role::parse(&role) != Some(Role::Admin) {
        tracing::warn!(user_id = id, email = %seed.email, role = %role, "admin email is held by another account");
        return Err(AppError::Conflict(format!(
            "{} is registered to a non-admin account",
            seed.email
        )));
    }

    tracing::debug!(user_id = id, email = %seed.email, "admin account already present");
    Ok(id)
}

fn stored_role(user: &UserModel) -> AppResult<Role> {
    Role::parse(&user.role)
        .ok_or_else(|| AppError::internal(format!("unknown role {} for user {}", user.role, user.id)))
}

pub(crate) fn profile_from_entity(model: &UserModel) -> AppResult<UserProfile> {
    Ok(UserProfile {
        id: model.id,
        full_name: model.full_name.clone(),
        email: model.email.clone(),
        role: stored_role(model)?,
        address: model.address.clone(),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_salted_and_verifiable() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();

        assert_ne!(first, second);
        assert!(verify_password(&first, "secret"));
        assert!(!verify_password(&first, "Secret"));
    }

    #[test]
    fn unreadable_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "secret"));
    }

    #[test]
    fn profile_omits_password_hash() {
        let now = Utc::now().into();
        let model = UserModel {
            id: 3,
            full_name: "Jane".into(),
            email: "jane@example.com".into(),
            password_hash: "$argon2id$...".into(),
            role: "admin".into(),
            address: Some("Jl. Sudirman".into()),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let profile = profile_from_entity(&model).unwrap();
        assert_eq!(profile.role, Role::Admin);

        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["address"], "Jl. Sudirman");
    }
}
