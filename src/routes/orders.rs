use axum::{
    Router,
    extract::State,
    routing::{get, patch},
};

use crate::{
    dto::orders::{CreateOrderRequest, ModifyOrderRequest},
    error::AppResult,
    middleware::auth::CurrentUser,
    models::Order,
    response::ApiResponse,
    routes::extract::{ValidatedJson, ValidatedPath},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", patch(modify_order).delete(remove_order))
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order added"),
        (status = 400, description = "Quantity exceeds stock"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<ApiResponse<()>> {
    order_service::create_order(&state, &user, payload).await
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Caller's orders", body = ApiResponse<Vec<Order>>),
        (status = 401, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<Order>>> {
    order_service::list_orders(&state, &user).await
}

#[utoipa::path(
    patch,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = ModifyOrderRequest,
    responses(
        (status = 200, description = "Order modified"),
        (status = 400, description = "Quantity exceeds stock"),
        (status = 403, description = "Order belongs to another user"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order has already been settled"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn modify_order(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(payload): ValidatedJson<ModifyOrderRequest>,
) -> AppResult<ApiResponse<()>> {
    order_service::modify_order(&state, &user, id, payload).await
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order removed"),
        (status = 403, description = "Order belongs to another user"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order has already been settled"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn remove_order(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<ApiResponse<()>> {
    order_service::remove_order(&state, &user, id).await
}
