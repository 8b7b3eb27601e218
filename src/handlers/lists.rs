//! List resource handlers: CRUD over grocery lists.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::db::GroceryList;
use crate::error::CartError;
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{parse_id, validate_name};
use crate::router::CartState;
use crate::types::{Envelope, IncludeItemsQuery, ListNameBody};

/// GET /grocery_list returns all lists, ascending by id.
pub async fn list_all(
    State(state): State<CartState>,
    ApiQuery(query): ApiQuery<IncludeItemsQuery>,
) -> Result<Json<Envelope<Vec<GroceryList>>>, CartError> {
    let include_items = query.include_items.unwrap_or(false);
    let lists = state.store.list_all(include_items).await?;
    let count = lists.len();
    Ok(Json(Envelope::collection(lists, count)))
}

/// POST /grocery_list creates a list from a trimmed, non-empty name.
pub async fn create(
    State(state): State<CartState>,
    ApiJson(body): ApiJson<ListNameBody>,
) -> Result<(StatusCode, Json<Envelope<GroceryList>>), CartError> {
    let name = validate_name(body.name)?;
    let list = state.store.create_list(&name).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message(
            list,
            "Grocery list created successfully",
        )),
    ))
}

/// GET /grocery_list/{id} includes items unless `include_items=false`.
pub async fn get_one(
    State(state): State<CartState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<IncludeItemsQuery>,
) -> Result<Json<Envelope<GroceryList>>, CartError> {
    let id = parse_id(&id)?;
    let include_items = query.include_items.unwrap_or(true);
    let list = state
        .store
        .get_list(id, include_items)
        .await?
        .ok_or_else(CartError::list_not_found)?;
    Ok(Json(Envelope::data(list)))
}

/// PUT /grocery_list/{id} renames with the same name validation as create.
pub async fn update(
    State(state): State<CartState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ListNameBody>,
) -> Result<Json<Envelope<GroceryList>>, CartError> {
    let id = parse_id(&id)?;
    let name = validate_name(body.name)?;
    let list = state.store.update_list(id, &name).await?;
    Ok(Json(Envelope::with_message(
        list,
        "Grocery list updated successfully",
    )))
}

/// DELETE /grocery_list/{id} cascades to the list's items atomically.
pub async fn delete(
    State(state): State<CartState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<GroceryList>>, CartError> {
    let id = parse_id(&id)?;
    let list = state.store.delete_list(id).await?;
    Ok(Json(Envelope::with_message(
        list,
        "Grocery list deleted successfully",
    )))
}
