use axum::{
    Router,
    extract::State,
    routing::{get, patch, post},
};

use crate::{
    dto::users::{ChangePasswordRequest, ModifyUserRequest, SignInRequest, SignUpRequest, TokenResponse},
    error::AppResult,
    middleware::auth::CurrentUser,
    models::UserProfile,
    response::ApiResponse,
    routes::extract::ValidatedJson,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/", get(profile).patch(modify))
        .route("/change-password", patch(change_password))
}

#[utoipa::path(
    post,
    path = "/users/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User signed up"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email has been used"),
        (status = 422, description = "Invalid JSON body"),
    ),
    tag = "Users"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> AppResult<ApiResponse<()>> {
    user_service::sign_up(&state, payload).await
}

#[utoipa::path(
    post,
    path = "/users/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<TokenResponse>),
        (status = 400, description = "Invalid email/password"),
    ),
    tag = "Users"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> AppResult<ApiResponse<TokenResponse>> {
    user_service::sign_in(&state, payload).await
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Caller profile", body = ApiResponse<UserProfile>),
        (status = 401, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn profile(user: CurrentUser) -> AppResult<ApiResponse<UserProfile>> {
    user_service::profile(&user)
}

#[utoipa::path(
    patch,
    path = "/users",
    request_body = ModifyUserRequest,
    responses(
        (status = 200, description = "User modified"),
        (status = 401, description = "Unauthenticated"),
        (status = 409, description = "Email has been used"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn modify(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ModifyUserRequest>,
) -> AppResult<ApiResponse<()>> {
    user_service::modify(&state, &user, payload).await
}

#[utoipa::path(
    patch,
    path = "/users/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Old password incorrect or confirmation mismatch"),
        (status = 401, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    user_service::change_password(&state, &user, payload).await
}
