pub mod json_backend;

use crate::{domain::Shop, errors::StoreError};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Describes a persisted backup artifact for a shop dataset.
#[derive(Debug, Clone)]
pub struct ShopBackupInfo {
    pub shop: String,
    pub id: String,
    pub created_at: String,
    pub path: std::path::PathBuf,
}

/// Abstraction over persistence backends capable of storing shop datasets
/// and snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, shop: &Shop, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Shop>;
    fn list_shops(&self) -> Result<Vec<String>>;
    fn delete(&self, name: &str) -> Result<()>;
    fn backup(&self, shop: &Shop, name: &str) -> Result<ShopBackupInfo>;
    fn list_backups(&self, name: &str) -> Result<Vec<ShopBackupInfo>>;
    fn restore(&self, backup: &ShopBackupInfo) -> Result<Shop>;
}

pub use json_backend::JsonStorage;
