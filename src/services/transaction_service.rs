use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;

use crate::{
    db::is_unique_violation,
    dto::transactions::CreateTransactionRequest,
    entity::{
        orders::ActiveModel as OrderActive,
        products::{Column as ProdCol, Entity as Products},
        transactions::{ActiveModel as TransactionActive, Column as TxCol, Entity as Transactions},
    },
    error::{AppError, AppResult},
    middleware::auth::{CurrentUser, ensure_owner},
    models::{Transaction, TransactionCustomer, TransactionProduct},
    response::ApiResponse,
    services::{
        inventory::ensure_stock_locked,
        order_service::{ensure_open, find_order_locked},
    },
    state::AppState,
};

const ORDER_CONSTRAINT: &str = "transactions_order_id_key";

const TRANSACTION_SELECT: &str = r#"
    SELECT t.id, t.order_id, o.product_id, p.name AS product_name, o.qty, o.total_price,
           t.user_id, u.full_name AS user_full_name, t.created_at, t.updated_at
    FROM transactions AS t
    JOIN users AS u ON u.id = t.user_id
    JOIN orders AS o ON o.id = t.order_id
    JOIN products AS p ON p.id = o.product_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    product_name: String,
    qty: i32,
    total_price: i64,
    user_id: i32,
    user_full_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Settle an order: record the transaction and move its quantity from stock to sold.
///
/// The order row is locked for the whole unit, so concurrent settlements of the
/// same order are serialized and only the first one succeeds. The product row is
/// locked too, keeping stock non-negative when different orders for the same
/// product settle at once. The cached product listing is evicted after commit.
pub async fn record_transaction(
    state: &AppState,
    user: &CurrentUser,
    payload: CreateTransactionRequest,
) -> AppResult<ApiResponse<()>> {
    let txn = state.orm.begin().await?;

    let order = find_order_locked(&txn, payload.order_id).await?;
    ensure_owner(user, order.user_id, "order")?;
    ensure_open(&order)?;

    let product = ensure_stock_locked(&txn, order.product_id, order.qty).await?;

    let inserted = TransactionActive {
        id: NotSet,
        user_id: Set(user.id()),
        order_id: Set(order.id),
        created_at: NotSet,
        updated_at: NotSet,
        deleted_at: NotSet,
    }
    .insert(&txn)
    .await;
    let transaction = match inserted {
        Ok(t) => t,
        Err(err) if is_unique_violation(&err, ORDER_CONSTRAINT) => {
            return Err(AppError::Conflict("order has already been settled".into()));
        }
        Err(err) => return Err(err.into()),
    };

    let qty = order.qty;
    let now = Utc::now();
    let mut settled: OrderActive = order.into();
    settled.settled_at = Set(Some(now.into()));
    settled.updated_at = Set(now.into());
    settled.update(&txn).await?;

    Products::update_many()
        .col_expr(ProdCol::Stock, Expr::col(ProdCol::Stock).sub(qty))
        .col_expr(ProdCol::Sold, Expr::col(ProdCol::Sold).add(qty))
        .col_expr(ProdCol::UpdatedAt, Expr::current_timestamp().into())
        .filter(ProdCol::Id.eq(product.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    state.cache.flush().await;

    tracing::info!(
        transaction_id = transaction.id,
        order_id = transaction.order_id,
        product_id = product.id,
        qty,
        "order settled"
    );

    Ok(ApiResponse::command(
        StatusCode::CREATED,
        "transaction successfully added",
    ))
}

pub async fn list_customer_transactions(
    state: &AppState,
    user: &CurrentUser,
) -> AppResult<ApiResponse<Vec<Transaction>>> {
    let sql = format!(
        "{TRANSACTION_SELECT} WHERE t.user_id = $1 AND t.deleted_at IS NULL ORDER BY t.created_at DESC, t.id DESC"
    );
    let rows = sqlx::query_as::<_, TransactionRow>(&sql)
        .bind(user.id())
        .fetch_all(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "transaction successfully fetched",
        rows.into_iter().map(transaction_from_row).collect(),
    ))
}

pub async fn list_all_transactions(
    state: &AppState,
) -> AppResult<ApiResponse<Vec<Transaction>>> {
    let sql = format!(
        "{TRANSACTION_SELECT} WHERE t.deleted_at IS NULL ORDER BY t.created_at DESC, t.id DESC"
    );
    let rows = sqlx::query_as::<_, TransactionRow>(&sql)
        .fetch_all(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "transaction successfully fetched",
        rows.into_iter().map(transaction_from_row).collect(),
    ))
}

pub async fn get_transaction(
    state: &AppState,
    user: &CurrentUser,
    id: i32,
) -> AppResult<ApiResponse<Transaction>> {
    let owner = Transactions::find_by_id(id)
        .filter(TxCol::DeletedAt.is_null())
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("transaction not found".into()))?;
    ensure_owner(user, owner.user_id, "transaction")?;

    let sql = format!("{TRANSACTION_SELECT} WHERE t.id = $1 AND t.deleted_at IS NULL");
    let row = sqlx::query_as::<_, TransactionRow>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("transaction not found".into()))?;

    Ok(ApiResponse::success(
        "transaction successfully fetched",
        transaction_from_row(row),
    ))
}

fn transaction_from_row(row: TransactionRow) -> Transaction {
    Transaction {
        id: row.id,
        order_id: row.order_id,
        product: TransactionProduct {
            id: row.product_id,
            name: row.product_name,
        },
        user: TransactionCustomer {
            id: row.user_id,
            full_name: row.user_full_name,
        },
        qty: row.qty,
        total_price: row.total_price,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
