//! Facade that coordinates the in-memory shop dataset and persistence.

use crate::domain::Shop;
use crate::errors::StoreError;
use crate::storage::StorageBackend;

pub struct ShopManager {
    pub current: Option<Shop>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
}

impl ShopManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// Creates a fresh shop and makes it current. Nothing is written until
    /// the first save.
    pub fn create(&mut self, name: &str) -> &mut Shop {
        self.current = Some(Shop::new(name));
        self.current_name = Some(name.to_string());
        self.current.as_mut().expect("shop just created")
    }

    pub fn load(&mut self, name: &str) -> Result<(), StoreError> {
        let shop = self.storage.load(name)?;
        self.current = Some(shop);
        self.current_name = Some(name.to_string());
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), StoreError> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| StoreError::InvalidRef("no shop is open".into()))?;
        let shop = self
            .current
            .as_ref()
            .ok_or_else(|| StoreError::InvalidRef("no shop is open".into()))?;
        self.storage.save(shop, &name)
    }

    pub fn close(&mut self) {
        self.current = None;
        self.current_name = None;
    }

    pub fn with_current<T>(&self, action: impl FnOnce(&Shop) -> T) -> Result<T, StoreError> {
        self.current
            .as_ref()
            .map(action)
            .ok_or_else(|| StoreError::InvalidRef("no shop is open".into()))
    }

    pub fn with_current_mut<T>(
        &mut self,
        action: impl FnOnce(&mut Shop) -> T,
    ) -> Result<T, StoreError> {
        self.current
            .as_mut()
            .map(action)
            .ok_or_else(|| StoreError::InvalidRef("no shop is open".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStorage;

    fn manager() -> ShopManager {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage =
            JsonStorage::new(Some(dir.path().to_path_buf()), None).expect("create storage");
        // Leak the tempdir guard so the backing directory outlives the test body.
        std::mem::forget(dir);
        ShopManager::new(Box::new(storage))
    }

    #[test]
    fn operations_require_an_open_shop() {
        let mut manager = manager();
        assert!(manager.with_current(|shop| shop.sale_count()).is_err());
        assert!(manager.save().is_err());

        manager.create("demo");
        assert_eq!(manager.with_current(|shop| shop.sale_count()).unwrap(), 0);
        manager.save().expect("save newly created shop");
    }

    #[test]
    fn save_and_reload_round_trip() {
        let mut manager = manager();
        manager.create("western");
        manager
            .with_current_mut(|shop| shop.company.name = "Western Stores".into())
            .unwrap();
        manager.save().expect("save shop");

        manager.close();
        manager.load("western").expect("reload shop");
        let name = manager
            .with_current(|shop| shop.company.name.clone())
            .unwrap();
        assert_eq!(name, "Western Stores");
    }
}
