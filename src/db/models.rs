use serde::{Deserialize, Serialize};

/// A named shopping list. `items` is populated only when the caller asked
/// for `include_items`; a freshly created list carries `Some(vec![])`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroceryList {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<GroceryListItem>>,
}

/// An entry owned by exactly one list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroceryListItem {
    pub id: i64,
    pub name: String,
    pub purchased: bool,
    #[serde(rename = "groceryListId")]
    pub grocery_list_id: i64,
}
