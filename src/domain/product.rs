use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;

/// Represents a stocked product tracked by the inventory screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub sku: String,
    pub selling_price: f64,
    pub cost_price: f64,
    pub quantity: u32,
    pub date_added: NaiveDate,
    pub expiry_date: NaiveDate,
}

impl Product {
    /// Creates a new product; the shop assigns the id when the product is added.
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        selling_price: f64,
        cost_price: f64,
        quantity: u32,
        date_added: NaiveDate,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            sku: sku.into(),
            selling_price,
            cost_price,
            quantity,
            date_added,
            expiry_date,
        }
    }

    /// A product is expired once its expiry date has passed.
    pub fn has_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    /// Margin earned per unit sold.
    pub fn unit_margin(&self) -> f64 {
        self.selling_price - self.cost_price
    }
}

impl Displayable for Product {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.name, self.sku)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product::new(
            "Bag of Rice",
            "RCE-01",
            120.0,
            90.0,
            40,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )
    }

    #[test]
    fn expiry_is_relative_to_today() {
        let product = sample();
        assert!(!product.has_expired(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
        assert!(product.has_expired(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
    }

    #[test]
    fn unit_margin_is_selling_minus_cost() {
        assert_eq!(sample().unit_margin(), 30.0);
    }
}
