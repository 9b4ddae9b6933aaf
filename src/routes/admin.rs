use axum::{Router, extract::State, routing::get};

use crate::{
    error::AppResult, middleware::auth::AdminClaims, models::Transaction, response::ApiResponse,
    services::transaction_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/transactions", get(list_all_transactions))
}

#[utoipa::path(
    get,
    path = "/admin/transactions",
    responses(
        (status = 200, description = "Every transaction", body = ApiResponse<Vec<Transaction>>),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_transactions(
    State(state): State<AppState>,
    _admin: AdminClaims,
) -> AppResult<ApiResponse<Vec<Transaction>>> {
    transaction_service::list_all_transactions(&state).await
}
