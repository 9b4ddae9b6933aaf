use serde::Deserialize;
use utoipa::ToSchema;

use super::{Validate, positive};
use crate::error::AppResult;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub order_id: i32,
}

impl Validate for CreateTransactionRequest {
    fn validate(&self) -> AppResult<()> {
        positive(self.order_id.into(), "Order id can't be empty")
    }
}
