use axum::{
    Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::transactions::CreateTransactionRequest,
    error::AppResult,
    middleware::auth::CurrentUser,
    models::Transaction,
    response::ApiResponse,
    routes::extract::{ValidatedJson, ValidatedPath},
    services::transaction_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(record_transaction))
        .route("/{id}", get(get_transaction))
}

#[utoipa::path(
    post,
    path = "/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Order settled"),
        (status = 400, description = "Quantity exceeds stock"),
        (status = 403, description = "Order belongs to another user"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order has already been settled"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn record_transaction(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateTransactionRequest>,
) -> AppResult<ApiResponse<()>> {
    transaction_service::record_transaction(&state, &user, payload).await
}

#[utoipa::path(
    get,
    path = "/transactions",
    responses(
        (status = 200, description = "Caller's transactions", body = ApiResponse<Vec<Transaction>>),
        (status = 401, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<Transaction>>> {
    transaction_service::list_customer_transactions(&state, &user).await
}

#[utoipa::path(
    get,
    path = "/transactions/{id}",
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction detail", body = ApiResponse<Transaction>),
        (status = 403, description = "Transaction belongs to another user"),
        (status = 404, description = "Transaction not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<ApiResponse<Transaction>> {
    transaction_service::get_transaction(&state, &user, id).await
}
