use serde::Deserialize;
use utoipa::ToSchema;

use super::{Validate, positive};
use crate::error::AppResult;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub product_id: i32,
    pub qty: i32,
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> AppResult<()> {
        positive(self.product_id.into(), "Product id can't be empty")?;
        positive(self.qty.into(), "Qty can't be empty")
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModifyOrderRequest {
    pub qty: i32,
}

impl Validate for ModifyOrderRequest {
    fn validate(&self) -> AppResult<()> {
        positive(self.qty.into(), "Qty can't be empty")
    }
}
