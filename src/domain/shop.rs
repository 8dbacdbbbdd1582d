use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{company::CompanyProfile, product::Product, sale::Sale, user::User};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The full shop dataset: products, recorded sales, staff accounts, and the
/// company profile. Services operate on this aggregate; the storage backend
/// persists it as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub company: CompanyProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Shop::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    next_product_id: u64,
    #[serde(default)]
    next_sale_id: u64,
    #[serde(default)]
    next_user_id: u64,
}

impl Shop {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            products: Vec::new(),
            sales: Vec::new(),
            users: Vec::new(),
            company: CompanyProfile::default(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
            next_product_id: 0,
            next_sale_id: 0,
            next_user_id: 0,
        }
    }

    /// Adds a product, assigning the next sequential id.
    pub fn add_product(&mut self, mut product: Product) -> u64 {
        self.next_product_id += 1;
        product.id = self.next_product_id;
        let id = product.id;
        self.products.push(product);
        self.touch();
        id
    }

    pub fn product(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn product_mut(&mut self, id: u64) -> Option<&mut Product> {
        self.products.iter_mut().find(|product| product.id == id)
    }

    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.name.eq_ignore_ascii_case(name))
    }

    pub fn remove_product(&mut self, id: u64) -> Option<Product> {
        let index = self.products.iter().position(|product| product.id == id)?;
        let removed = self.products.remove(index);
        self.touch();
        Some(removed)
    }

    /// Adds a sale, assigning the next sequential id.
    pub fn add_sale(&mut self, mut sale: Sale) -> u64 {
        self.next_sale_id += 1;
        sale.id = self.next_sale_id;
        let id = sale.id;
        self.sales.push(sale);
        self.touch();
        id
    }

    pub fn sale(&self, id: u64) -> Option<&Sale> {
        self.sales.iter().find(|sale| sale.id == id)
    }

    pub fn remove_sale(&mut self, id: u64) -> Option<Sale> {
        let index = self.sales.iter().position(|sale| sale.id == id)?;
        let removed = self.sales.remove(index);
        self.touch();
        Some(removed)
    }

    /// Adds a user, assigning the next sequential id.
    pub fn add_user(&mut self, mut user: User) -> u64 {
        self.next_user_id += 1;
        user.id = self.next_user_id;
        let id = user.id;
        self.users.push(user);
        self.touch();
        id
    }

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn user_mut(&mut self, id: u64) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    pub fn remove_user(&mut self, id: u64) -> Option<User> {
        let index = self.users.iter().position(|user| user.id == id)?;
        let removed = self.users.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn sale_count(&self) -> usize {
        self.sales.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
