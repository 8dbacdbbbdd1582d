use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::common::Displayable;

/// Payment channels accepted at the counter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Transfer => "Transfer",
        };
        f.write_str(label)
    }
}

/// One product line inside a recorded sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleItem {
    pub product_id: u64,
    pub product_name: String,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub quantity: u32,
    pub line_total: f64,
}

impl SaleItem {
    /// Builds a line item, computing the line total from price and quantity.
    pub fn new(
        product_id: u64,
        product_name: impl Into<String>,
        unit_price: f64,
        unit_cost: f64,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            unit_price,
            unit_cost,
            quantity,
            line_total: unit_price * quantity as f64,
        }
    }

    /// Margin contributed by this line.
    pub fn line_revenue(&self) -> f64 {
        (self.unit_price - self.unit_cost) * self.quantity as f64
    }
}

/// A completed sale with its line items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: u64,
    pub customer_name: String,
    pub total_price: f64,
    pub total_revenue: f64,
    pub purchase_time: NaiveDateTime,
    pub payment_method: PaymentMethod,
    pub sales_rep: u64,
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Assembles a sale from line items; totals are derived from the lines.
    pub fn new(
        customer_name: impl Into<String>,
        purchase_time: NaiveDateTime,
        payment_method: PaymentMethod,
        sales_rep: u64,
        items: Vec<SaleItem>,
    ) -> Self {
        let total_price = items.iter().map(|item| item.line_total).sum();
        let total_revenue = items.iter().map(SaleItem::line_revenue).sum();
        Self {
            id: 0,
            customer_name: customer_name.into(),
            total_price,
            total_revenue,
            purchase_time,
            payment_method,
            sales_rep,
            items,
        }
    }
}

impl Displayable for Sale {
    fn display_label(&self) -> String {
        format!("{} ({})", self.customer_name, self.purchase_time.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn totals_are_derived_from_line_items() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let items = vec![
            SaleItem::new(1, "Soap", 50.0, 35.0, 2),
            SaleItem::new(2, "Candle", 20.0, 12.0, 5),
        ];
        let sale = Sale::new("Ada", time, PaymentMethod::Cash, 1, items);
        assert_eq!(sale.total_price, 200.0);
        assert_eq!(sale.total_revenue, 70.0);
    }
}
