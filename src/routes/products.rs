use axum::{
    Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::products::ProductRequest,
    error::AppResult,
    middleware::auth::AdminClaims,
    models::Product,
    response::ApiResponse,
    routes::extract::{ValidatedJson, ValidatedPath},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(add_product))
        .route(
            "/{id}",
            get(get_product).patch(modify_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "List products", body = ApiResponse<Vec<Product>>)
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Product>>> {
    product_service::list_products(&state).await
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<ApiResponse<Product>> {
    product_service::get_product(&state, id).await
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product added"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn add_product(
    State(state): State<AppState>,
    _admin: AdminClaims,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<ApiResponse<()>> {
    product_service::add_product(&state, payload).await
}

#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product modified"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Product or category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn modify_product(
    State(state): State<AppState>,
    _admin: AdminClaims,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<ApiResponse<()>> {
    product_service::modify_product(&state, id, payload).await
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminClaims,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<ApiResponse<()>> {
    product_service::delete_product(&state, id).await
}
