//! Item resource handlers, all scoped to a parent list.
//!
//! Every operation verifies the parent list exists before any item-level
//! logic runs, so a request against a missing list reports 404 no matter
//! what the item criteria look like.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::db::GroceryListItem;
use crate::error::CartError;
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::validate_name;
use crate::router::CartState;
use crate::types::{BulkDeleteQuery, BulkUpdateBody, CreateItemBody, Envelope, PurchasedFilterQuery};

/// Item routes report a malformed parent id with a list-specific message.
fn parse_list_id(segment: &str) -> Result<i64, CartError> {
    segment
        .trim()
        .parse::<i64>()
        .map_err(|_| CartError::invalid_list_id())
}

async fn ensure_list_exists(state: &CartState, list_id: i64) -> Result<(), CartError> {
    if state.store.list_exists(list_id).await? {
        Ok(())
    } else {
        Err(CartError::list_not_found())
    }
}

/// GET /grocery_list/{id}/items returns items ascending by id, with an
/// optional purchased filter.
pub async fn list_items(
    State(state): State<CartState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<PurchasedFilterQuery>,
) -> Result<Json<Envelope<Vec<GroceryListItem>>>, CartError> {
    let list_id = parse_list_id(&id)?;
    ensure_list_exists(&state, list_id).await?;
    let items = state.store.items_filtered(list_id, query.purchased).await?;
    let count = items.len();
    Ok(Json(Envelope::scoped_collection(items, count, list_id)))
}

/// POST /grocery_list/{id}/items adds an item; `purchased` defaults to false.
pub async fn add_item(
    State(state): State<CartState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<CreateItemBody>,
) -> Result<(StatusCode, Json<Envelope<GroceryListItem>>), CartError> {
    let list_id = parse_list_id(&id)?;
    ensure_list_exists(&state, list_id).await?;
    let name = validate_name(body.name)?;
    let item = state
        .store
        .create_item(list_id, &name, body.purchased)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message(
            item,
            "Item added to grocery list successfully",
        )),
    ))
}

/// PATCH /grocery_list/{id}/items: bulk purchased-flag update.
///
/// `markAll` wins over `itemIds`; an absent or empty id set without
/// `markAll` is a validation error. The returned count reflects rows
/// actually updated, so ids belonging to other lists are not counted.
pub async fn bulk_update(
    State(state): State<CartState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<BulkUpdateBody>,
) -> Result<Json<Envelope<()>>, CartError> {
    let list_id = parse_list_id(&id)?;
    ensure_list_exists(&state, list_id).await?;

    let updated = if body.mark_all {
        state.store.update_items_all(list_id, body.purchased).await?
    } else if let Some(ids) = body.item_ids.as_deref().filter(|ids| !ids.is_empty()) {
        state
            .store
            .update_items_by_ids(list_id, ids, body.purchased)
            .await?
    } else {
        return Err(CartError::Validation(
            "Either set markAll to true or provide itemIds array".to_string(),
        ));
    };

    Ok(Json(Envelope::updated(updated, list_id)))
}

/// DELETE /grocery_list/{id}/items: bulk delete with criteria priority
/// all, then purchased, then item_ids.
pub async fn bulk_delete(
    State(state): State<CartState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<BulkDeleteQuery>,
) -> Result<Json<Envelope<()>>, CartError> {
    let list_id = parse_list_id(&id)?;
    ensure_list_exists(&state, list_id).await?;

    let deleted = if query.all.unwrap_or(false) {
        state.store.delete_items_all(list_id).await?
    } else if query.purchased.unwrap_or(false) {
        state.store.delete_items_purchased(list_id).await?
    } else if let Some(raw) = query.item_ids.as_deref() {
        let ids = parse_item_ids(raw);
        if ids.is_empty() {
            return Err(CartError::Validation(
                "No valid item IDs provided".to_string(),
            ));
        }
        state.store.delete_items_by_ids(list_id, &ids).await?
    } else {
        return Err(CartError::Validation(
            "Specify deletion criteria: all=true, purchased=true, or item_ids=1,2,3".to_string(),
        ));
    };

    Ok(Json(Envelope::deleted(deleted, list_id)))
}

/// Comma-separated id list; non-numeric tokens are dropped.
fn parse_item_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|tok| tok.trim().parse::<i64>().ok())
        .collect()
}
