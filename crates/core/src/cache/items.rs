//! Item cache operations.
//!
//! Items are never updated in place. A refresh inserts the new batch, prunes
//! rows older than the update interval and restamps `last_update`, all in one
//! transaction.

use super::connection::CacheDb;
use super::{decode_ts, encode_ts};
use crate::Error;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;

/// A cached film row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub url: String,
    pub name: String,
    /// Running time in minutes.
    pub length: i64,
    pub post_time: DateTime<Utc>,
}

/// A film row about to be inserted; `id` and `post_time` are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub url: String,
    pub name: String,
    pub length: i64,
}

/// Row counts from one applied refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub inserted: usize,
    pub pruned: usize,
}

impl CacheDb {
    /// Insert items stamped with `post_time`.
    ///
    /// Returns the number of rows inserted.
    pub async fn insert_items(&self, items: &[NewItem], post_time: DateTime<Utc>) -> Result<usize, Error> {
        let items = items.to_vec();
        let post_time = encode_ts(post_time);
        self.conn
            .call(move |conn| -> Result<usize, Error> {
                let tx = conn.transaction()?;
                let inserted = insert_batch(&tx, &items, &post_time)?;
                tx.commit()?;
                Ok(inserted)
            })
            .await
            .map_err(Error::from)
    }

    /// Get up to `limit` items, most recent first.
    ///
    /// Rows from the same batch share a post time and keep their insert order.
    pub async fn recent_items(&self, limit: usize) -> Result<Vec<Item>, Error> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.conn
            .call(move |conn| -> Result<Vec<Item>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, url, name, length, post_time
                     FROM items
                     ORDER BY post_time DESC, id ASC
                     LIMIT ?1",
                )?;

                let rows = stmt.query_map(params![limit], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                })?;

                let mut items = Vec::new();
                for row in rows {
                    let (id, url, name, length, post_time) = row?;
                    items.push(Item { id, url, name, length, post_time: decode_ts(&post_time)? });
                }
                Ok(items)
            })
            .await
            .map_err(Error::from)
    }

    /// Count all cached items.
    pub async fn count_items(&self) -> Result<usize, Error> {
        self.conn
            .call(|conn| -> Result<usize, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
                Ok(count as usize)
            })
            .await
            .map_err(Error::from)
    }

    /// Apply one refresh cycle atomically.
    ///
    /// Inserts `items` stamped with `now`, deletes items older than
    /// `now - interval`, and replaces the `last_update` row with `now`.
    pub async fn apply_refresh(
        &self, items: Vec<NewItem>, now: DateTime<Utc>, interval: Duration,
    ) -> Result<RefreshStats, Error> {
        let stamp = encode_ts(now);
        let cutoff = encode_ts(now - interval);
        self.conn
            .call(move |conn| -> Result<RefreshStats, Error> {
                let tx = conn.transaction()?;
                let inserted = insert_batch(&tx, &items, &stamp)?;
                let pruned = tx.execute("DELETE FROM items WHERE post_time < ?1", params![cutoff])?;
                tx.execute("DELETE FROM last_update", [])?;
                tx.execute("INSERT INTO last_update (last_update) VALUES (?1)", params![stamp])?;
                tx.commit()?;
                Ok(RefreshStats { inserted, pruned })
            })
            .await
            .map_err(Error::from)
    }
}

fn insert_batch(
    conn: &tokio_rusqlite::rusqlite::Connection, items: &[NewItem], post_time: &str,
) -> Result<usize, Error> {
    let mut stmt = conn.prepare("INSERT INTO items (url, name, length, post_time) VALUES (?1, ?2, ?3, ?4)")?;
    for item in items {
        stmt.execute(params![item.url, item.name, item.length, post_time])?;
    }
    Ok(items.len())
}
