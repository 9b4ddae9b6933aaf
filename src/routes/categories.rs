use axum::{
    Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::categories::CategoryRequest,
    error::AppResult,
    middleware::auth::AdminClaims,
    models::{Category, CategoryWithProducts},
    response::ApiResponse,
    routes::extract::{ValidatedJson, ValidatedPath},
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(add_category))
        .route(
            "/{id}",
            get(get_category)
                .patch(modify_category)
                .delete(delete_category),
        )
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "List categories", body = ApiResponse<Vec<Category>>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Category>>> {
    category_service::list_categories(&state).await
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category with its products", body = ApiResponse<CategoryWithProducts>),
        (status = 404, description = "Category not found"),
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<ApiResponse<CategoryWithProducts>> {
    category_service::get_category(&state, id).await
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category added"),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Type has been created"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn add_category(
    State(state): State<AppState>,
    _admin: AdminClaims,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> AppResult<ApiResponse<()>> {
    category_service::add_category(&state, payload).await
}

#[utoipa::path(
    patch,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category modified"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn modify_category(
    State(state): State<AppState>,
    _admin: AdminClaims,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> AppResult<ApiResponse<()>> {
    category_service::modify_category(&state, id, payload).await
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    _admin: AdminClaims,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<ApiResponse<()>> {
    category_service::delete_category(&state, id).await
}
