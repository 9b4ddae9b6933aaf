use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};
use sea_orm::sea_query::LockType;

use crate::{
    entity::products::{Column as ProdCol, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
};

/// Requested quantity must not exceed what is on the shelf.
pub fn check_stock(available: i32, requested: i32) -> AppResult<()> {
    if requested > available {
        return Err(AppError::BadRequest("qty is greater than stock".into()));
    }
    Ok(())
}

pub async fn find_product<C: ConnectionTrait>(conn: &C, product_id: i32) -> AppResult<ProductModel> {
    Products::find_by_id(product_id)
        .filter(ProdCol::DeletedAt.is_null())
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".into()))
}

/// Load the product and check `requested` against its current stock.
pub async fn ensure_stock<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
    requested: i32,
) -> AppResult<ProductModel> {
    let product = find_product(conn, product_id).await?;
    check_stock(product.stock, requested)?;
    Ok(product)
}

/// Same as [`ensure_stock`] but holds a row lock until the surrounding transaction ends.
pub async fn ensure_stock_locked<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
    requested: i32,
) -> AppResult<ProductModel> {
    let product = Products::find_by_id(product_id)
        .filter(ProdCol::DeletedAt.is_null())
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".into()))?;
    check_stock(product.stock, requested)?;
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_quantity_up_to_available_stock() {
        assert!(check_stock(10, 1).is_ok());
        assert!(check_stock(10, 10).is_ok());
    }

    #[test]
    fn rejects_quantity_above_stock() {
        match check_stock(10, 11) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "qty is greater than stock"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
        assert!(check_stock(0, 1).is_err());
    }
}
