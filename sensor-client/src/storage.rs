use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Storage key holding the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Client side key/value persistence, shaped after the browser's `localStorage`.
#[allow(async_fn_in_trait)]
pub trait LocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    async fn remove_item(&mut self, key: &str) -> Result<()>;

    async fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    data: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }
}

impl LocalStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&mut self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        self.data.clear();
        Ok(())
    }
}

/// Keeps items as a flat JSON object on disk. The file is read on every
/// access so writes from another process are picked up.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::storage(format!("{} is not a storage file: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, data: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, serde_json::to_vec_pretty(data)?).await?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut data = self.load().await?;
        data.insert(key.to_string(), value.to_string());
        self.save(&data).await
    }

    async fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut data = self.load().await?;
        if data.remove(key).is_some() {
            self.save(&data).await?;
        }
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        self.save(&BTreeMap::new()).await
    }
}
