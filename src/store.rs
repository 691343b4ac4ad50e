// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store over a pluggable key/value backend.
//!
//! Every collection lives under one key as a JSON array and is read and
//! rewritten whole on each call. There is no caching layer, so a read that
//! follows a write always sees it.

use crate::models::Record;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("stored value under '{key}' could not be decoded: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("value for '{key}' could not be encoded: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Raw text storage keyed by name.
pub trait KeyValue {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// In-process backend. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Budgets,
    Goals,
    Friends,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Transactions => "transactions",
            Collection::Budgets => "budgets",
            Collection::Goals => "goals",
            Collection::Friends => "friendsData",
        }
    }
}

/// Singleton keys.
pub mod keys {
    pub const USER_PROFILE: &str = "userProfile";
    pub const AUTO_SAVE_CONFIG: &str = "autoSaveConfig";
    pub const CURRENCY: &str = "currency";
    pub const THEME: &str = "theme";
    pub const XP: &str = "xp";
    pub const STREAK: &str = "streak";
    pub const LAST_LOGIN: &str = "lastLogin";
}

pub struct RecordStore<S> {
    backend: S,
}

impl<S: KeyValue> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    pub fn raw(&self, key: &str) -> StoreResult<Option<String>> {
        self.backend.get(key)
    }

    /// Missing key yields an empty list; malformed text is a decode error.
    pub fn list<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>> {
        Ok(self.get(collection.key())?.unwrap_or_default())
    }

    /// Read-only views use this so one corrupted collection does not take the
    /// whole screen down.
    pub fn list_or_default<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        match self.list(collection) {
            Ok(items) => items,
            Err(err) => {
                eprintln!("warning: {}; showing '{}' as empty", err, collection.key());
                Vec::new()
            }
        }
    }

    pub fn set_all<T: Serialize>(&mut self, collection: Collection, records: &[T]) -> StoreResult<()> {
        self.put(collection.key(), records)
    }

    pub fn insert<T>(&mut self, collection: Collection, record: T) -> StoreResult<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut data: Vec<T> = self.list(collection)?;
        data.push(record);
        self.set_all(collection, &data)
    }

    /// Replaces the record with the same id. Returns false, and writes
    /// nothing, when the id is absent.
    pub fn replace<T>(&mut self, collection: Collection, record: T) -> StoreResult<bool>
    where
        T: Record + Serialize + DeserializeOwned,
    {
        let mut data: Vec<T> = self.list(collection)?;
        match data.iter().position(|r| r.id() == record.id()) {
            Some(idx) => {
                data[idx] = record;
                self.set_all(collection, &data)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove_by_id<T>(&mut self, collection: Collection, id: i64) -> StoreResult<bool>
    where
        T: Record + Serialize + DeserializeOwned,
    {
        let data: Vec<T> = self.list(collection)?;
        let before = data.len();
        let kept: Vec<T> = data.into_iter().filter(|r| r.id() != id).collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.set_all(collection, &kept)?;
        Ok(true)
    }

    pub fn find<T>(&self, collection: Collection, id: i64) -> StoreResult<Option<T>>
    where
        T: Record + DeserializeOwned,
    {
        let data: Vec<T> = self.list(collection)?;
        Ok(data.into_iter().find(|r| r.id() == id))
    }

    /// Ids are creation timestamps in milliseconds, bumped past the largest
    /// existing id so they stay unique within the collection.
    pub fn next_id<T>(&self, collection: Collection, now: NaiveDateTime) -> StoreResult<i64>
    where
        T: Record + DeserializeOwned,
    {
        let stamp = now.and_utc().timestamp_millis();
        let data: Vec<T> = self.list(collection)?;
        let max = data.iter().map(|r| r.id()).max();
        Ok(match max {
            Some(m) if m >= stamp => m + 1,
            _ => stamp,
        })
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.backend.get(key)? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|source| StoreError::Decode {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(v) => v.unwrap_or_default(),
            Err(err) => {
                eprintln!("warning: {}; using default", err);
                T::default()
            }
        }
    }

    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StoreResult<()> {
        let text = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &text)
    }

    pub fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.backend.remove(key)
    }

    /// Text settings may have been written without JSON quoting.
    pub fn get_text(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.backend.get(key)?.map(|raw| {
            serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.trim().to_string())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Budget;
    use crate::models::Category;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn budget(id: i64, limit: i64) -> Budget {
        Budget {
            id,
            category: Category::Food,
            limit: Decimal::from(limit),
        }
    }

    #[test]
    fn missing_key_lists_empty() {
        let store = RecordStore::new(MemoryStore::new());
        let items: Vec<Budget> = store.list(Collection::Budgets).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn replace_absent_id_writes_nothing() {
        let mut store = RecordStore::new(MemoryStore::new());
        store.insert(Collection::Budgets, budget(1, 100)).unwrap();
        let before = store.raw("budgets").unwrap();
        assert!(!store.replace(Collection::Budgets, budget(2, 50)).unwrap());
        assert_eq!(store.raw("budgets").unwrap(), before);
    }

    #[test]
    fn next_id_moves_past_existing_ids() {
        let mut store = RecordStore::new(MemoryStore::new());
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let stamp = now.and_utc().timestamp_millis();
        assert_eq!(store.next_id::<Budget>(Collection::Budgets, now).unwrap(), stamp);
        store.insert(Collection::Budgets, budget(stamp, 10)).unwrap();
        assert_eq!(
            store.next_id::<Budget>(Collection::Budgets, now).unwrap(),
            stamp + 1
        );
    }

    #[test]
    fn text_settings_accept_unquoted_values() {
        let mut store = RecordStore::new(MemoryStore::new());
        store.backend.set("currency", "INR").unwrap();
        assert_eq!(store.get_text("currency").unwrap().as_deref(), Some("INR"));
        store.put("currency", "EUR").unwrap();
        assert_eq!(store.get_text("currency").unwrap().as_deref(), Some("EUR"));
    }
}
