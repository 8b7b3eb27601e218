//! Wire types: the shared response envelope plus request DTOs.
//!
//! Bodies arrive as loosely-shaped JSON; each DTO models the fields as
//! explicit optionals and the handlers validate them before any domain
//! logic runs.

use serde::{Deserialize, Serialize};

/// Uniform response envelope returned by every endpoint.
///
/// Absent fields are omitted from the serialized JSON, so a plain success
/// response is `{"success":true,"data":...}` while bulk operations carry
/// their counters on the envelope itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(
        default,
        rename = "updatedCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_count: Option<u64>,
    #[serde(
        default,
        rename = "deletedCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted_count: Option<u64>,
    #[serde(
        default,
        rename = "groceryListId",
        skip_serializing_if = "Option::is_none"
    )]
    pub grocery_list_id: Option<i64>,
}

impl<T> Envelope<T> {
    fn base(success: bool) -> Self {
        Self {
            success,
            data: None,
            message: None,
            error: None,
            count: None,
            updated_count: None,
            deleted_count: None,
            grocery_list_id: None,
        }
    }

    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::base(true)
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            ..Self::base(true)
        }
    }

    pub fn collection(data: T, count: usize) -> Self {
        Self {
            data: Some(data),
            count: Some(count),
            ..Self::base(true)
        }
    }

    pub fn scoped_collection(data: T, count: usize, list_id: i64) -> Self {
        Self {
            data: Some(data),
            count: Some(count),
            grocery_list_id: Some(list_id),
            ..Self::base(true)
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            message: Some(message.into()),
            error,
            ..Self::base(false)
        }
    }
}

impl Envelope<()> {
    pub fn updated(count: u64, list_id: i64) -> Self {
        Self {
            message: Some(format!("Updated {count} items in grocery list")),
            updated_count: Some(count),
            grocery_list_id: Some(list_id),
            ..Self::base(true)
        }
    }

    pub fn deleted(count: u64, list_id: i64) -> Self {
        Self {
            message: Some(format!("Deleted {count} items from grocery list")),
            deleted_count: Some(count),
            grocery_list_id: Some(list_id),
            ..Self::base(true)
        }
    }
}

/// Body for `POST /grocery_list` and `PUT /grocery_list/{id}`.
#[derive(Debug, Deserialize)]
pub struct ListNameBody {
    pub name: Option<String>,
}

/// Body for `POST /grocery_list/{id}/items`.
#[derive(Debug, Deserialize)]
pub struct CreateItemBody {
    pub name: Option<String>,
    #[serde(default)]
    pub purchased: bool,
}

/// Body for `PATCH /grocery_list/{id}/items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateBody {
    pub purchased: bool,
    #[serde(default)]
    pub mark_all: bool,
    pub item_ids: Option<Vec<i64>>,
}

/// Query for the list endpoints. Collection GET defaults to `false`,
/// single GET to `true`; the handlers apply the default.
#[derive(Debug, Deserialize)]
pub struct IncludeItemsQuery {
    pub include_items: Option<bool>,
}

/// Query for `GET /grocery_list/{id}/items`.
#[derive(Debug, Deserialize)]
pub struct PurchasedFilterQuery {
    pub purchased: Option<bool>,
}

/// Query for `DELETE /grocery_list/{id}/items`. Criteria priority is
/// `all`, then `purchased`, then `item_ids`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteQuery {
    pub all: Option<bool>,
    pub purchased: Option<bool>,
    pub item_ids: Option<String>,
}
