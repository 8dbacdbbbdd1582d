//! JSON file backend for shop datasets.
//!
//! Each shop is one pretty-printed JSON document under the storage root.
//! Saves are atomic (write to a temp file, then rename) and the previous
//! file is copied into a timestamped backup before it is replaced, with a
//! bounded retention count.

use chrono::Utc;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{domain::Shop, errors::StoreError};

use super::{Result, ShopBackupInfo, StorageBackend};

const SHOP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

#[derive(Debug, Clone)]
pub struct JsonStorage {
    shops_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let base = root.unwrap_or_else(default_base_dir);
        let shops_dir = base.join("shops");
        let backups_dir = base.join("backups");
        ensure_dir(&shops_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            shops_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn shop_path(&self, name: &str) -> PathBuf {
        self.shops_dir
            .join(format!("{}.{}", canonical_name(name), SHOP_EXTENSION))
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    fn write_backup_file(&self, shop: &Shop, name: &str) -> Result<ShopBackupInfo> {
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!(
            "{}_{}.{}",
            canonical_name(name),
            timestamp,
            SHOP_EXTENSION
        );
        let path = dir.join(&file_name);
        let json = serde_json::to_string_pretty(shop)?;
        write_atomic(&path, &json)?;
        self.prune_backups(name)?;
        Ok(ShopBackupInfo {
            shop: canonical_name(name),
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!(
            "{}_{}.{}",
            canonical_name(name),
            timestamp,
            SHOP_EXTENSION
        );
        fs::copy(path, dir.join(backup_name))?;
        self.prune_backups(name)?;
        Ok(())
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let backups = self.list_backups(name)?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(&entry.path);
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, shop: &Shop, name: &str) -> Result<()> {
        let path = self.shop_path(name);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        save_shop_to_path(shop, &path)
    }

    fn load(&self, name: &str) -> Result<Shop> {
        let path = self.shop_path(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        load_shop_from_path(&path)
    }

    fn list_shops(&self) -> Result<Vec<String>> {
        if !self.shops_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.shops_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SHOP_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.shop_path(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn backup(&self, shop: &Shop, name: &str) -> Result<ShopBackupInfo> {
        self.write_backup_file(shop, name)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<ShopBackupInfo>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SHOP_EXTENSION) {
                continue;
            }
            let file_name = match path.file_name().and_then(|stem| stem.to_str()) {
                Some(value) => value.to_string(),
                None => continue,
            };
            let stem = file_name.trim_end_matches(&format!(".{SHOP_EXTENSION}"));
            let created_at = backup_timestamp(stem);
            entries.push(ShopBackupInfo {
                shop: canonical_name(name),
                id: file_name,
                created_at,
                path,
            });
        }
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    fn restore(&self, backup: &ShopBackupInfo) -> Result<Shop> {
        if !backup.path.exists() {
            return Err(StoreError::NotFound(backup.id.clone()));
        }
        let target = self.shop_path(&backup.shop);
        fs::copy(&backup.path, &target)?;
        load_shop_from_path(&target)
    }
}

pub fn save_shop_to_path(shop: &Shop, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(shop)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_shop_from_path(path: &Path) -> Result<Shop> {
    let data = fs::read_to_string(path)?;
    let shop: Shop = serde_json::from_str(&data)?;
    Ok(shop)
}

fn default_base_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shopfront")
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os_string = path.as_os_str().to_os_string();
    os_string.push(format!(".{TMP_SUFFIX}"));
    PathBuf::from(os_string)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

fn canonical_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

/// Extracts `YYYYMMDD_HHMMSS` from a `<name>_<YYYYMMDD>_<HHMMSS>` stem.
/// Files that do not follow the backup naming yield an empty timestamp
/// instead of failing the listing.
fn backup_timestamp(stem: &str) -> String {
    let mut parts = stem.rsplitn(3, '_');
    match (parts.next(), parts.next()) {
        (Some(time), Some(date))
            if time.len() == 6
                && date.len() == 8
                && time.chars().all(|c| c.is_ascii_digit())
                && date.chars().all(|c| c.is_ascii_digit()) =>
        {
            format!("{date}_{time}")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageBackend;

    #[test]
    fn backup_listing_tolerates_foreign_file_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonStorage::new(Some(dir.path().to_path_buf()), None).expect("storage");
        let backup_dir = dir.path().join("backups").join("demo");
        fs::create_dir_all(&backup_dir).expect("backup dir");
        // Multibyte characters inside the timestamp window must not panic
        // the listing.
        fs::write(backup_dir.join("кафе-демо.json"), "{}").expect("write foreign file");
        fs::write(backup_dir.join("demo_20240101_090000.json"), "{}").expect("write backup");

        let backups = storage.list_backups("demo").expect("list backups");
        assert_eq!(backups.len(), 2);
        assert_eq!(backups[0].created_at, "20240101_090000");
        assert_eq!(backups[1].created_at, "");
    }

    #[test]
    fn timestamps_only_parse_from_backup_shaped_stems() {
        assert_eq!(backup_timestamp("demo_20240101_090000"), "20240101_090000");
        assert_eq!(backup_timestamp("my-shop_20241231_235959"), "20241231_235959");
        assert_eq!(backup_timestamp("кафе-демо"), "");
        assert_eq!(backup_timestamp("no-underscores"), "");
        assert_eq!(backup_timestamp("demo_2024_0900"), "");
    }
}
