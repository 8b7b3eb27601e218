//! Typed HTTP client for the cartd REST surface.
//!
//! Every call decodes the response body into the shared [`Envelope`], for
//! handled error statuses (400/404/500) as well as successes; callers
//! branch on `success`. Only transport-level failures (no response at all)
//! surface as `Err` for the caller to handle.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::db::{GroceryList, GroceryListItem};
use crate::types::Envelope;

#[derive(Debug, Clone)]
pub struct CartClient {
    http: Client,
    base_url: String,
}

/// Selection criteria for [`CartClient::bulk_update`].
#[derive(Debug, Clone)]
pub enum BulkUpdateSelection {
    /// Target every item in the list.
    All,
    /// Target only the named items; ids outside the list are ignored.
    ByIds(Vec<i64>),
}

/// Selection criteria for [`CartClient::bulk_delete`], highest priority first.
#[derive(Debug, Clone)]
pub enum BulkDeleteSelection {
    All,
    Purchased,
    ByIds(Vec<i64>),
}

impl CartClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use an externally configured `reqwest::Client` (timeouts, proxies).
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn decode<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<Envelope<T>, reqwest::Error> {
        resp.json::<Envelope<T>>().await
    }

    pub async fn list_all(
        &self,
        include_items: bool,
    ) -> Result<Envelope<Vec<GroceryList>>, reqwest::Error> {
        let url = format!(
            "{}/grocery_list?include_items={include_items}",
            self.base_url
        );
        Self::decode(self.http.get(url).send().await?).await
    }

    pub async fn get(
        &self,
        id: i64,
        include_items: bool,
    ) -> Result<Envelope<GroceryList>, reqwest::Error> {
        let url = format!(
            "{}/grocery_list/{id}?include_items={include_items}",
            self.base_url
        );
        Self::decode(self.http.get(url).send().await?).await
    }

    pub async fn create(&self, name: &str) -> Result<Envelope<GroceryList>, reqwest::Error> {
        let url = format!("{}/grocery_list", self.base_url);
        let resp = self.http.post(url).json(&json!({ "name": name })).send().await?;
        Self::decode(resp).await
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
    ) -> Result<Envelope<GroceryList>, reqwest::Error> {
        let url = format!("{}/grocery_list/{id}", self.base_url);
        let resp = self.http.put(url).json(&json!({ "name": name })).send().await?;
        Self::decode(resp).await
    }

    pub async fn delete(&self, id: i64) -> Result<Envelope<GroceryList>, reqwest::Error> {
        let url = format!("{}/grocery_list/{id}", self.base_url);
        Self::decode(self.http.delete(url).send().await?).await
    }

    pub async fn list_items(
        &self,
        list_id: i64,
        purchased: Option<bool>,
    ) -> Result<Envelope<Vec<GroceryListItem>>, reqwest::Error> {
        let mut url = format!("{}/grocery_list/{list_id}/items", self.base_url);
        if let Some(flag) = purchased {
            url.push_str(&format!("?purchased={flag}"));
        }
        Self::decode(self.http.get(url).send().await?).await
    }

    pub async fn add_item(
        &self,
        list_id: i64,
        name: &str,
        purchased: bool,
    ) -> Result<Envelope<GroceryListItem>, reqwest::Error> {
        let url = format!("{}/grocery_list/{list_id}/items", self.base_url);
        let resp = self
            .http
            .post(url)
            .json(&json!({ "name": name, "purchased": purchased }))
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Bulk-set the purchased flag; the envelope carries `updatedCount`.
    pub async fn bulk_update(
        &self,
        list_id: i64,
        purchased: bool,
        selection: BulkUpdateSelection,
    ) -> Result<Envelope<()>, reqwest::Error> {
        let url = format!("{}/grocery_list/{list_id}/items", self.base_url);
        let body = match selection {
            BulkUpdateSelection::All => json!({ "purchased": purchased, "markAll": true }),
            BulkUpdateSelection::ByIds(ids) => {
                json!({ "purchased": purchased, "itemIds": ids })
            }
        };
        let resp = self.http.patch(url).json(&body).send().await?;
        Self::decode(resp).await
    }

    /// Bulk-delete by criteria; the envelope carries `deletedCount`.
    pub async fn bulk_delete(
        &self,
        list_id: i64,
        selection: BulkDeleteSelection,
    ) -> Result<Envelope<()>, reqwest::Error> {
        let url = format!(
            "{}/grocery_list/{list_id}/items?{}",
            self.base_url,
            bulk_delete_query(&selection)
        );
        Self::decode(self.http.delete(url).send().await?).await
    }
}

fn bulk_delete_query(selection: &BulkDeleteSelection) -> String {
    match selection {
        BulkDeleteSelection::All => "all=true".to_string(),
        BulkDeleteSelection::Purchased => "purchased=true".to_string(),
        BulkDeleteSelection::ByIds(ids) => {
            let ids = ids
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!("item_ids={ids}")
        }
    }
}
