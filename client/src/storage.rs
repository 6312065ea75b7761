//! Client-local persistent key/value storage.
//!
//! Values are strings, like browser local storage. Everything lives in one
//! JSON object on disk (`storage.json` under the client home). The file is
//! re-read on every access, so two handles on the same directory agree.

use std::{io, path::PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("storage file is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let mut path = home.into();
        path.push(STORAGE_FILE);
        Self { path }
    }

    pub async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let items = self.load().await?;
        Ok(items.get(key).and_then(Value::as_str).map(str::to_owned))
    }

    pub async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.load().await?;
        items.insert(key.to_owned(), Value::String(value.to_owned()));
        self.persist(&items).await
    }

    pub async fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self.load().await?;
        if items.remove(key).is_some() {
            self.persist(&items).await?;
        }
        Ok(())
    }

    async fn load(&self) -> StorageResult<Map<String, Value>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) if json.trim().is_empty() => Ok(Map::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, items: &Map<String, Value>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
