use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous,
};
use sqlx::{Pool, Row, Sqlite};

use crate::db::models::{GroceryList, GroceryListItem};
use crate::db::schema::SQLITE_INIT;
use crate::error::CartError;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct GroceryStore {
    pool: SqlitePool,
}

impl GroceryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open the database (creating the file if missing) and apply the
    /// bundled DDL.
    pub async fn connect(database_url: &str) -> Result<Self, CartError> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new().connect_with(opts).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), CartError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn list_exists(&self, id: i64) -> Result<bool, CartError> {
        let row = sqlx::query("SELECT 1 FROM grocery_lists WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn list_all(&self, include_items: bool) -> Result<Vec<GroceryList>, CartError> {
        let rows = sqlx::query("SELECT id, name FROM grocery_lists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let mut lists = rows
            .into_iter()
            .map(row_to_list)
            .collect::<Result<Vec<_>, _>>()?;
        if include_items {
            for list in &mut lists {
                list.items = Some(self.items_of(list.id).await?);
            }
        }
        Ok(lists)
    }

    pub async fn get_list(
        &self,
        id: i64,
        include_items: bool,
    ) -> Result<Option<GroceryList>, CartError> {
        let row = sqlx::query("SELECT id, name FROM grocery_lists WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else { return Ok(None) };
        let mut list = row_to_list(row)?;
        if include_items {
            list.items = Some(self.items_of(list.id).await?);
        }
        Ok(Some(list))
    }

    pub async fn create_list(&self, name: &str) -> Result<GroceryList, CartError> {
        let res = sqlx::query("INSERT INTO grocery_lists (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(GroceryList {
            id: res.last_insert_rowid(),
            name: name.to_string(),
            items: Some(Vec::new()),
        })
    }

    /// Rename a list. A missing row surfaces as a structured `NotFound`,
    /// never by matching on error text.
    pub async fn update_list(&self, id: i64, name: &str) -> Result<GroceryList, CartError> {
        let res = sqlx::query("UPDATE grocery_lists SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(CartError::list_not_found());
        }
        let items = self.items_of(id).await?;
        Ok(GroceryList {
            id,
            name: name.to_string(),
            items: Some(items),
        })
    }

    /// Delete a list together with its items inside one transaction, so a
    /// failed list delete never leaves orphaned rows behind.
    pub async fn delete_list(&self, id: i64) -> Result<GroceryList, CartError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT id, name FROM grocery_lists WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Err(CartError::list_not_found());
        };
        let list = row_to_list(row)?;

        sqlx::query("DELETE FROM grocery_items WHERE grocery_list_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM grocery_lists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(list)
    }

    pub async fn items_of(&self, list_id: i64) -> Result<Vec<GroceryListItem>, CartError> {
        self.items_filtered(list_id, None).await
    }

    pub async fn items_filtered(
        &self,
        list_id: i64,
        purchased: Option<bool>,
    ) -> Result<Vec<GroceryListItem>, CartError> {
        let rows = match purchased {
            Some(flag) => {
                let flag_i = if flag { 1 } else { 0 };
                sqlx::query(
                    r#"SELECT id, name, purchased, grocery_list_id FROM grocery_items
                       WHERE grocery_list_id = ? AND purchased = ? ORDER BY id"#,
                )
                .bind(list_id)
                .bind(flag_i)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"SELECT id, name, purchased, grocery_list_id FROM grocery_items
                       WHERE grocery_list_id = ? ORDER BY id"#,
                )
                .bind(list_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.into_iter().map(row_to_item).collect()
    }

    pub async fn create_item(
        &self,
        list_id: i64,
        name: &str,
        purchased: bool,
    ) -> Result<GroceryListItem, CartError> {
        let purchased_i = if purchased { 1 } else { 0 };
        let res = sqlx::query(
            "INSERT INTO grocery_items (name, purchased, grocery_list_id) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(purchased_i)
        .bind(list_id)
        .execute(&self.pool)
        .await?;
        Ok(GroceryListItem {
            id: res.last_insert_rowid(),
            name: name.to_string(),
            purchased,
            grocery_list_id: list_id,
        })
    }

    /// Set the purchased flag on every item in the list. Returns rows updated.
    pub async fn update_items_all(&self, list_id: i64, purchased: bool) -> Result<u64, CartError> {
        let purchased_i = if purchased { 1 } else { 0 };
        let res = sqlx::query("UPDATE grocery_items SET purchased = ? WHERE grocery_list_id = ?")
            .bind(purchased_i)
            .bind(list_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    /// Set the purchased flag on the given items, restricted to the list.
    /// Ids outside the list don't match the WHERE clause and are excluded
    /// from the returned count.
    pub async fn update_items_by_ids(
        &self,
        list_id: i64,
        ids: &[i64],
        purchased: bool,
    ) -> Result<u64, CartError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let purchased_i = if purchased { 1 } else { 0 };
        let sql = format!(
            "UPDATE grocery_items SET purchased = ? WHERE grocery_list_id = ? AND id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql).bind(purchased_i).bind(list_id);
        for id in ids {
            query = query.bind(*id);
        }
        Ok(query.execute(&self.pool).await?.rows_affected())
    }

    pub async fn delete_items_all(&self, list_id: i64) -> Result<u64, CartError> {
        let res = sqlx::query("DELETE FROM grocery_items WHERE grocery_list_id = ?")
            .bind(list_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn delete_items_purchased(&self, list_id: i64) -> Result<u64, CartError> {
        let res =
            sqlx::query("DELETE FROM grocery_items WHERE grocery_list_id = ? AND purchased = 1")
                .bind(list_id)
                .execute(&self.pool)
                .await?;
        Ok(res.rows_affected())
    }

    pub async fn delete_items_by_ids(&self, list_id: i64, ids: &[i64]) -> Result<u64, CartError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let sql = format!(
            "DELETE FROM grocery_items WHERE grocery_list_id = ? AND id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql).bind(list_id);
        for id in ids {
            query = query.bind(*id);
        }
        Ok(query.execute(&self.pool).await?.rows_affected())
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn row_to_list(row: SqliteRow) -> Result<GroceryList, CartError> {
    Ok(GroceryList {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        items: None,
    })
}

fn row_to_item(row: SqliteRow) -> Result<GroceryListItem, CartError> {
    let purchased_i: i64 = row.try_get("purchased")?;
    Ok(GroceryListItem {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        purchased: purchased_i != 0,
        grocery_list_id: row.try_get("grocery_list_id")?,
    })
}
