//! Validated CRUD helpers for the product inventory.

use chrono::NaiveDate;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{Product, Shop};

pub struct InventoryService;

impl InventoryService {
    /// Adds a new product and returns its identifier.
    pub fn add(shop: &mut Shop, product: Product) -> ServiceResult<u64> {
        Self::validate(&product)?;
        if shop.product_by_name(&product.name).is_some() {
            return Err(ServiceError::Invalid(format!(
                "A product named `{}` already exists",
                product.name
            )));
        }
        Ok(shop.add_product(product))
    }

    /// Updates the product identified by `id` via the provided mutator.
    /// The mutation is validated on a copy; a rejected update leaves the
    /// stored record untouched.
    pub fn update<F>(shop: &mut Shop, id: u64, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Product),
    {
        let product = shop
            .product_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("product {id}")))?;
        let mut updated = product.clone();
        mutator(&mut updated);
        Self::validate(&updated)?;
        *product = updated;
        shop.touch();
        Ok(())
    }

    /// Removes the product identified by `id`, returning the removed record.
    pub fn remove(shop: &mut Shop, id: u64) -> ServiceResult<Product> {
        shop.remove_product(id)
            .ok_or_else(|| ServiceError::NotFound(format!("product {id}")))
    }

    pub fn get(shop: &Shop, id: u64) -> ServiceResult<&Product> {
        shop.product(id)
            .ok_or_else(|| ServiceError::NotFound(format!("product {id}")))
    }

    pub fn find_by_name<'a>(shop: &'a Shop, name: &str) -> ServiceResult<&'a Product> {
        shop.product_by_name(name)
            .ok_or_else(|| ServiceError::NotFound(format!("product `{name}`")))
    }

    /// Snapshot of the inventory for table rendering.
    pub fn list(shop: &Shop) -> Vec<&Product> {
        shop.products.iter().collect()
    }

    /// Products whose expiry date has passed relative to `today`.
    pub fn expired(shop: &Shop, today: NaiveDate) -> Vec<&Product> {
        shop.products
            .iter()
            .filter(|product| product.has_expired(today))
            .collect()
    }

    fn validate(product: &Product) -> ServiceResult<()> {
        if product.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Product name must not be blank".into()));
        }
        if product.sku.trim().is_empty() {
            return Err(ServiceError::Invalid("Product SKU must not be blank".into()));
        }
        if product.selling_price < 0.0 || product.cost_price < 0.0 {
            return Err(ServiceError::Invalid(
                "Product prices must not be negative".into(),
            ));
        }
        Ok(())
    }
}
