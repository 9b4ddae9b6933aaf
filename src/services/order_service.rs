use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;

use crate::{
    dto::orders::{CreateOrderRequest, ModifyOrderRequest},
    entity::orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    error::{AppError, AppResult},
    middleware::auth::{CurrentUser, ensure_owner},
    models::{Order, OrderProduct},
    response::ApiResponse,
    services::inventory::ensure_stock,
    state::AppState,
};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    product_name: String,
    product_price: i64,
    qty: i32,
    total_price: i64,
    settled_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub async fn create_order(
    state: &AppState,
    user: &CurrentUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<()>> {
    let product = ensure_stock(&state.orm, payload.product_id, payload.qty).await?;

    let order = OrderActive {
        id: NotSet,
        user_id: Set(user.id()),
        product_id: Set(product.id),
        qty: Set(payload.qty),
        total_price: Set(total_price(product.price, payload.qty)),
        settled_at: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
        deleted_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(order_id = order.id, user_id = order.user_id, "order created");
    Ok(ApiResponse::command(
        StatusCode::CREATED,
        "order successfully added",
    ))
}

pub async fn list_orders(
    state: &AppState,
    user: &CurrentUser,
) -> AppResult<ApiResponse<Vec<Order>>> {
    let rows = sqlx::query_as::<_, OrderRow>(
        r#"
        SELECT o.id, o.user_id, o.product_id, p.name AS product_name, p.price AS product_price,
               o.qty, o.total_price, o.settled_at, o.created_at, o.updated_at
        FROM orders AS o
        JOIN products AS p ON p.id = o.product_id
        WHERE o.user_id = $1 AND o.deleted_at IS NULL
        ORDER BY o.created_at DESC, o.id DESC
        "#,
    )
    .bind(user.id())
    .fetch_all(&state.pool)
    .await?;

    let orders = rows.into_iter().map(order_from_row).collect();
    Ok(ApiResponse::success("order successfully fetched", orders))
}

pub async fn modify_order(
    state: &AppState,
    user: &CurrentUser,
    id: i32,
    payload: ModifyOrderRequest,
) -> AppResult<ApiResponse<()>> {
    let txn = state.orm.begin().await?;

    let order = find_open_order_locked(&txn, user, id).await?;
    let product = ensure_stock(&txn, order.product_id, payload.qty).await?;

    let mut active: OrderActive = order.into();
    active.qty = Set(payload.qty);
    active.total_price = Set(total_price(product.price, payload.qty));
    active.updated_at = Set(Utc::now().into());
    active.update(&txn).await?;

    txn.commit().await?;

    Ok(ApiResponse::command(
        StatusCode::OK,
        "order successfully modified",
    ))
}

pub async fn remove_order(
    state: &AppState,
    user: &CurrentUser,
    id: i32,
) -> AppResult<ApiResponse<()>> {
    let txn = state.orm.begin().await?;

    // Settled orders may still be removed; their transaction keeps the history.
    let order = find_order_locked(&txn, id).await?;
    ensure_owner(user, order.user_id, "order")?;

    let now = Utc::now();
    let mut active: OrderActive = order.into();
    active.updated_at = Set(now.into());
    active.deleted_at = Set(Some(now.into()));
    active.update(&txn).await?;

    txn.commit().await?;

    Ok(ApiResponse::command(
        StatusCode::OK,
        "order successfully removed",
    ))
}

/// Lock a live order row for the rest of the transaction.
pub(crate) async fn find_order_locked<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> AppResult<OrderModel> {
    Orders::find_by_id(id)
        .filter(OrderCol::DeletedAt.is_null())
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".into()))
}

/// Locked order that belongs to `user` and has not been settled yet.
async fn find_open_order_locked<C: ConnectionTrait>(
    conn: &C,
    user: &CurrentUser,
    id: i32,
) -> AppResult<OrderModel> {
    let order = find_order_locked(conn, id).await?;
    ensure_owner(user, order.user_id, "order")?;
    ensure_open(&order)?;
    Ok(order)
}

pub(crate) fn ensure_open(order: &OrderModel) -> AppResult<()> {
    if order.settled_at.is_some() {
        return Err(AppError::Conflict("order has already been settled".into()));
    }
    Ok(())
}

pub(crate) fn total_price(unit_price: i64, qty: i32) -> i64 {
    unit_price * i64::from(qty)
}

fn order_from_row(row: OrderRow) -> Order {
    Order {
        id: row.id,
        user_id: row.user_id,
        product: OrderProduct {
            id: row.product_id,
            name: row.product_name,
            price: row.product_price,
        },
        qty: row.qty,
        total_price: row.total_price,
        settled: row.settled_at.is_some(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(settled: bool) -> OrderModel {
        let now = Utc::now().into();
        OrderModel {
            id: 1,
            user_id: 2,
            product_id: 3,
            qty: 4,
            total_price: 400,
            settled_at: settled.then_some(now),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn total_price_is_quantity_times_unit_price() {
        assert_eq!(total_price(125_000, 3), 375_000);
        assert_eq!(total_price(i64::from(i32::MAX), 2), 2 * i64::from(i32::MAX));
    }

    #[test]
    fn settled_orders_are_closed() {
        assert!(ensure_open(&order(false)).is_ok());
        assert!(matches!(
            ensure_open(&order(true)),
            Err(AppError::Conflict(_))
        ));
    }
}
