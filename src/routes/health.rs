use serde::Serialize;
use utoipa::ToSchema;

use crate::response::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check() -> ApiResponse<HealthData> {
    ApiResponse::success(
        "Health check",
        HealthData {
            status: "ok".to_string(),
        },
    )
}
