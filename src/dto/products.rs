use serde::Deserialize;
use utoipa::ToSchema;

use super::{MAX_TEXT_LEN, Validate, max_len, positive, required};
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub category_id: i32,
    pub price: i64,
    pub stock: i32,
}

impl Validate for ProductRequest {
    fn validate(&self) -> AppResult<()> {
        required(&self.name, "Name can't be empty")?;
        max_len(&self.name, MAX_TEXT_LEN, "Name can't be longer than 60 characters")?;
        required(&self.description, "Description can't be empty")?;
        positive(self.category_id.into(), "Category id can't be empty")?;
        positive(self.price, "Price must be greater than zero")?;
        if self.stock < 0 {
            return Err(AppError::BadRequest("Stock can't be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ProductRequest {
        ProductRequest {
            name: "Linen shirt".into(),
            description: "Breathable".into(),
            category_id: 1,
            price: 150_000,
            stock: 0,
        }
    }

    #[test]
    fn zero_stock_is_allowed() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_price_and_negative_stock() {
        let free = ProductRequest { price: 0, ..payload() };
        assert!(free.validate().is_err());

        let negative = ProductRequest { stock: -1, ..payload() };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn rejects_names_wider_than_the_column() {
        let long = ProductRequest {
            name: "n".repeat(61),
            ..payload()
        };
        match long.validate() {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(msg, "Name can't be longer than 60 characters")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
