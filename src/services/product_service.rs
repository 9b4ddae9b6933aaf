use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::products::ProductRequest,
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::AppResult,
    models::Product,
    response::ApiResponse,
    services::{category_service::find_category, inventory::find_product},
    state::AppState,
};

/// Product listing, served from the cache when present.
pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<Vec<Product>>> {
    if let Some(products) = state.cache.get_products().await {
        tracing::debug!(count = products.len(), "product listing served from cache");
        return Ok(ApiResponse::success(
            "products successfully fetched",
            products.as_ref().clone(),
        ));
    }

    let generation = state.cache.generation();
    let items: Vec<Product> = Products::find()
        .filter(Column::DeletedAt.is_null())
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    tracing::debug!(count = items.len(), "product listing loaded from store");
    let items = state.cache.set_products(items, generation).await;

    Ok(ApiResponse::success(
        "products successfully fetched",
        items.as_ref().clone(),
    ))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = find_product(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "product with id successfully fetched",
        product_from_entity(product),
    ))
}

pub async fn add_product(
    state: &AppState,
    payload: ProductRequest,
) -> AppResult<ApiResponse<()>> {
    find_category(&state.orm, payload.category_id).await?;

    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        description: Set(payload.description),
        category_id: Set(payload.category_id),
        price: Set(payload.price),
        stock: Set(payload.stock),
        sold: NotSet,
        created_at: NotSet,
        updated_at: NotSet,
        deleted_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;
    state.cache.flush().await;

    tracing::info!(product_id = product.id, "product added");
    Ok(ApiResponse::command(
        StatusCode::CREATED,
        "product successfully added",
    ))
}

pub async fn modify_product(
    state: &AppState,
    id: i32,
    payload: ProductRequest,
) -> AppResult<ApiResponse<()>> {
    find_category(&state.orm, payload.category_id).await?;
    let existing = find_product(&state.orm, id).await?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.description = Set(payload.description);
    active.category_id = Set(payload.category_id);
    active.price = Set(payload.price);
    active.stock = Set(payload.stock);
    active.updated_at = Set(Utc::now().into());
    active.update(&state.orm).await?;
    state.cache.flush().await;

    Ok(ApiResponse::command(
        StatusCode::OK,
        "product successfully modified",
    ))
}

pub async fn delete_product(state: &AppState, id: i32) -> AppResult<ApiResponse<()>> {
    let existing = find_product(&state.orm, id).await?;

    let now = Utc::now();
    let mut active: ActiveModel = existing.into();
    active.updated_at = Set(now.into());
    active.deleted_at = Set(Some(now.into()));
    active.update(&state.orm).await?;
    state.cache.flush().await;

    Ok(ApiResponse::command(
        StatusCode::OK,
        "product successfully deleted",
    ))
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        category_id: model.category_id,
        price: model.price,
        stock: model.stock,
        sold: model.sold,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
