use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    db::is_unique_violation,
    dto::categories::CategoryRequest,
    entity::categories::{ActiveModel, Column, Entity as Categories, Model as CategoryModel},
    error::{AppError, AppResult},
    models::{Category, CategoryProduct, CategoryWithProducts},
    response::ApiResponse,
    state::AppState,
};

const TYPE_CONSTRAINT: &str = "categories_type_key";

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<Vec<Category>>> {
    let categories = Categories::find()
        .filter(Column::DeletedAt.is_null())
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "categories successfully fetched",
        categories,
    ))
}

pub async fn get_category(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<CategoryWithProducts>> {
    let category = find_category(&state.orm, id).await?;

    let products = sqlx::query_as::<_, CategoryProduct>(
        r#"
        SELECT id, name, price, stock, sold
        FROM products
        WHERE category_id = $1 AND deleted_at IS NULL
        ORDER BY id
        "#,
    )
    .bind(category.id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "category successfully fetched",
        CategoryWithProducts {
            id: category.id,
            kind: category.kind,
            products,
            created_at: category.created_at.with_timezone(&Utc),
            updated_at: category.updated_at.with_timezone(&Utc),
        },
    ))
}

pub async fn add_category(
    state: &AppState,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<()>> {
    let active = ActiveModel {
        id: NotSet,
        kind: Set(payload.kind),
        created_at: NotSet,
        updated_at: NotSet,
        deleted_at: NotSet,
    };

    match active.insert(&state.orm).await {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err, TYPE_CONSTRAINT) => {
            return Err(AppError::Conflict("type has been created".into()));
        }
        Err(err) => return Err(err.into()),
    }

    Ok(ApiResponse::command(
        StatusCode::CREATED,
        "category successfully added",
    ))
}

pub async fn modify_category(
    state: &AppState,
    id: i32,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<()>> {
    let existing = find_category(&state.orm, id).await?;

    let mut active: ActiveModel = existing.into();
    active.kind = Set(payload.kind);
    active.updated_at = Set(Utc::now().into());

    match active.update(&state.orm).await {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err, TYPE_CONSTRAINT) => {
            return Err(AppError::Conflict("type has been created".into()));
        }
        Err(err) => return Err(err.into()),
    }

    Ok(ApiResponse::command(
        StatusCode::OK,
        "category successfully modified",
    ))
}

pub async fn delete_category(state: &AppState, id: i32) -> AppResult<ApiResponse<()>> {
    let existing = find_category(&state.orm, id).await?;

    let now = Utc::now();
    let mut active: ActiveModel = existing.into();
    active.updated_at = Set(now.into());
    active.deleted_at = Set(Some(now.into()));
    active.update(&state.orm).await?;

    Ok(ApiResponse::command(
        StatusCode::OK,
        "category successfully deleted",
    ))
}

pub async fn find_category<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<CategoryModel> {
    Categories::find_by_id(id)
        .filter(Column::DeletedAt.is_null())
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("category not found".into()))
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        kind: model.kind,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
