// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Durable client-side storage.
//!
//! A small key-value surface over a local SQLite file. It survives restarts
//! and holds the serialized review session under a well-known key, so an
//! interrupted session can be picked up where it left off.

use std::path::Path;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

use wordloop_core::ErrorReport;
use wordloop_core::Fallible;
use wordloop_core::ReviewSession;

/// The key under which the review session aggregate is stored.
pub const SESSION_KEY: &str = "wordloop_session";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL);";

pub struct ClientStore {
    conn: Connection,
}

impl ClientStore {
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(sql_err)?;
        conn.execute_batch(SCHEMA).map_err(sql_err)?;
        Ok(ClientStore { conn })
    }

    pub fn get(&self, key: &str) -> Fallible<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(sql_err)
    }

    pub fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(sql_err)?;
        Ok(())
    }

    #[allow(dead_code)]
    pub fn remove(&self, key: &str) -> Fallible<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(sql_err)?;
        Ok(())
    }

    /// Loads the persisted session, if any. A blob that fails to parse or
    /// violates the session invariant is logged and discarded rather than
    /// resumed.
    pub fn load_session(&self) -> Fallible<Option<ReviewSession>> {
        let Some(blob) = self.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<ReviewSession>(&blob) {
            Ok(session) => match session.validate() {
                Ok(()) => Ok(Some(session)),
                Err(e) => {
                    log::warn!("discarding persisted session: {e}");
                    Ok(None)
                }
            },
            Err(e) => {
                log::warn!("discarding malformed persisted session: {e}");
                Ok(None)
            }
        }
    }

    pub fn save_session(&self, session: &ReviewSession) -> Fallible<()> {
        let blob = serde_json::to_string(session)?;
        self.set(SESSION_KEY, &blob)
    }
}

fn sql_err(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("client store error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordloop_core::ItemId;
    use wordloop_core::Rating;
    use wordloop_core::SessionId;
    use wordloop_core::Timestamp;

    use tempfile::tempdir;

    fn open_tmp() -> (tempfile::TempDir, ClientStore) {
        let dir = tempdir().unwrap();
        let store = ClientStore::open(&dir.path().join("client.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_get_set_remove_roundtrip() -> Fallible<()> {
        let (_dir, store) = open_tmp();
        assert_eq!(store.get("k")?, None);
        store.set("k", "v1")?;
        assert_eq!(store.get("k")?, Some("v1".to_string()));
        store.set("k", "v2")?;
        assert_eq!(store.get("k")?, Some("v2".to_string()));
        store.remove("k")?;
        assert_eq!(store.get("k")?, None);
        Ok(())
    }

    #[test]
    fn test_session_survives_reopen() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("client.db");
        let started_at = Timestamp::try_from("2024-03-01T12:00:00.000".to_string())?;
        let mut session = ReviewSession::start(SessionId::mint(started_at, 1));
        session.record(ItemId::new("a"), Rating::Easy, 85);

        {
            let store = ClientStore::open(&path)?;
            store.save_session(&session)?;
        }
        let store = ClientStore::open(&path)?;
        let loaded = store.load_session()?.unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.mastered_count, 1);
        Ok(())
    }

    #[test]
    fn test_no_session_is_none() -> Fallible<()> {
        let (_dir, store) = open_tmp();
        assert_eq!(store.load_session()?, None);
        Ok(())
    }

    #[test]
    fn test_malformed_session_is_discarded() -> Fallible<()> {
        let (_dir, store) = open_tmp();
        store.set(SESSION_KEY, "{not json")?;
        assert_eq!(store.load_session()?, None);
        Ok(())
    }

    #[test]
    fn test_invariant_violating_session_is_discarded() -> Fallible<()> {
        let (_dir, store) = open_tmp();
        // Index claims progress the reviewed list does not back up.
        store.set(
            SESSION_KEY,
            r#"{"sessionId":"abc","currentIndex":3,"reviewedItemIds":[],"improvedCount":0,"masteredCount":0}"#,
        )?;
        assert_eq!(store.load_session()?, None);
        Ok(())
    }
}
