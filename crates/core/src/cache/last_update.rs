//! The single `last_update` timestamp record.

use super::connection::CacheDb;
use super::{decode_ts, encode_ts};
use crate::Error;
use chrono::{DateTime, Utc};
use tokio_rusqlite::params;

impl CacheDb {
    /// Get the time of the last refresh.
    ///
    /// Returns None if no refresh has ever been recorded.
    pub async fn last_update(&self) -> Result<Option<DateTime<Utc>>, Error> {
        let raw = self
            .conn
            .call(|conn| -> Result<Option<String>, Error> {
                let result = conn.query_row("SELECT last_update FROM last_update ORDER BY id DESC LIMIT 1", [], |row| {
                    row.get(0)
                });

                match result {
                    Ok(ts) => Ok(Some(ts)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        raw.as_deref().map(decode_ts).transpose()
    }

    /// Overwrite the last refresh time, leaving exactly one row.
    pub async fn set_last_update(&self, ts: DateTime<Utc>) -> Result<(), Error> {
        let stamp = encode_ts(ts);
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM last_update", [])?;
                tx.execute("INSERT INTO last_update (last_update) VALUES (?1)", params![stamp])?;
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}
