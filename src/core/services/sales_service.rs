//! Recording, inspecting, refunding, and deleting sales.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::info;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{PaymentMethod, Sale, SaleItem, Session, Shop};

/// One requested product line before validation.
#[derive(Debug, Clone)]
pub struct LineDraft {
    pub product_id: u64,
    pub quantity: u32,
}

/// A sale as captured on the new-sale screen, before stock checks.
#[derive(Debug, Clone)]
pub struct SaleDraft {
    pub customer_name: String,
    pub payment_method: PaymentMethod,
    pub lines: Vec<LineDraft>,
}

pub struct SalesService;

impl SalesService {
    /// Records a sale: validates stock for every line, decrements product
    /// quantities, derives line and sale totals from the product prices, and
    /// bumps the sales rep's running total.
    pub fn record(
        shop: &mut Shop,
        session: &Session,
        draft: SaleDraft,
        purchase_time: NaiveDateTime,
    ) -> ServiceResult<u64> {
        if draft.customer_name.trim().is_empty() {
            return Err(ServiceError::Invalid("Customer name must not be blank".into()));
        }
        if draft.lines.is_empty() {
            return Err(ServiceError::Invalid(
                "A sale must contain at least one product".into(),
            ));
        }

        let mut items = Vec::with_capacity(draft.lines.len());
        // A draft may carry several lines for one product; stock is checked
        // against the running total per product id so duplicate lines cannot
        // oversell together.
        let mut requested: HashMap<u64, u32> = HashMap::new();
        for line in &draft.lines {
            let product = shop
                .product(line.product_id)
                .ok_or_else(|| ServiceError::NotFound(format!("product {}", line.product_id)))?;
            if line.quantity == 0 {
                return Err(ServiceError::Invalid(format!(
                    "Quantity for `{}` must be at least 1",
                    product.name
                )));
            }
            let total = requested.entry(line.product_id).or_insert(0);
            *total = total.saturating_add(line.quantity);
            if *total > product.quantity {
                return Err(ServiceError::Invalid(format!(
                    "Only {} of `{}` in stock",
                    product.quantity, product.name
                )));
            }
            items.push(SaleItem::new(
                product.id,
                product.name.clone(),
                product.selling_price,
                product.cost_price,
                line.quantity,
            ));
        }

        // All lines validated; now apply the stock decrements.
        for line in &draft.lines {
            if let Some(product) = shop.product_mut(line.product_id) {
                product.quantity -= line.quantity;
            }
        }

        let sale = Sale::new(
            draft.customer_name.trim(),
            purchase_time,
            draft.payment_method,
            session.user_id,
            items,
        );
        let id = shop.add_sale(sale);
        if let Some(rep) = shop.user_mut(session.user_id) {
            rep.total_sales += 1;
        }
        info!(sale = id, rep = session.user_id, "sale recorded");
        Ok(id)
    }

    pub fn get(shop: &Shop, id: u64) -> ServiceResult<&Sale> {
        shop.sale(id)
            .ok_or_else(|| ServiceError::NotFound(format!("sale {id}")))
    }

    /// Full name of the rep that recorded the sale, if the account still exists.
    pub fn rep_name(shop: &Shop, sale: &Sale) -> Option<String> {
        shop.user(sale.sales_rep).map(|user| user.full_name())
    }

    /// Snapshot of recorded sales for table rendering.
    pub fn list(shop: &Shop) -> Vec<&Sale> {
        shop.sales.iter().collect()
    }

    /// Refunds a sale: restores the stock of every line item that still has
    /// a product record, then removes the sale. Admin only.
    pub fn refund(shop: &mut Shop, session: &Session, id: u64) -> ServiceResult<Sale> {
        require_admin(session)?;
        let sale = shop
            .sale(id)
            .ok_or_else(|| ServiceError::NotFound(format!("sale {id}")))?
            .clone();
        for item in &sale.items {
            if let Some(product) = shop.product_mut(item.product_id) {
                product.quantity += item.quantity;
            }
        }
        shop.remove_sale(id);
        info!(sale = id, "sale refunded");
        Ok(sale)
    }

    /// Deletes a sale without touching stock. Admin only.
    pub fn delete(shop: &mut Shop, session: &Session, id: u64) -> ServiceResult<Sale> {
        require_admin(session)?;
        shop.remove_sale(id)
            .ok_or_else(|| ServiceError::NotFound(format!("sale {id}")))
    }
}

pub(crate) fn require_admin(session: &Session) -> ServiceResult<()> {
    if session.is_admin {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::AuthService;
    use crate::domain::Product;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap()
    }

    fn shop_with_rep(is_admin: bool) -> (Shop, Session) {
        let mut shop = Shop::new("Sales");
        AuthService::register(
            &mut shop,
            "rep@example.com",
            "Rhoda",
            "Eze",
            "pw",
            is_admin,
            now(),
        )
        .expect("register rep");
        let session = AuthService::login(&mut shop, "rep@example.com", "pw", now())
            .expect("login rep");
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        shop.add_product(Product::new("Soap", "SP-1", 50.0, 35.0, 10, date, date));
        (shop, session)
    }

    fn draft(quantity: u32) -> SaleDraft {
        SaleDraft {
            customer_name: "Ada".into(),
            payment_method: PaymentMethod::Cash,
            lines: vec![LineDraft {
                product_id: 1,
                quantity,
            }],
        }
    }

    #[test]
    fn recording_decrements_stock_and_totals() {
        let (mut shop, session) = shop_with_rep(false);
        let id = SalesService::record(&mut shop, &session, draft(4), now()).expect("record");

        let sale = SalesService::get(&shop, id).expect("fetch sale");
        assert_eq!(sale.total_price, 200.0);
        assert_eq!(sale.total_revenue, 60.0);
        assert_eq!(shop.product(1).unwrap().quantity, 6);
        assert_eq!(shop.user(session.user_id).unwrap().total_sales, 1);
    }

    #[test]
    fn oversold_lines_are_rejected_before_any_stock_change() {
        let (mut shop, session) = shop_with_rep(false);
        let err = SalesService::record(&mut shop, &session, draft(11), now())
            .expect_err("overselling must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(shop.product(1).unwrap().quantity, 10);
    }

    #[test]
    fn duplicate_lines_for_one_product_share_the_stock_check() {
        let (mut shop, session) = shop_with_rep(false);
        let split = |quantity| SaleDraft {
            customer_name: "Ada".into(),
            payment_method: PaymentMethod::Cash,
            lines: vec![
                LineDraft {
                    product_id: 1,
                    quantity,
                },
                LineDraft {
                    product_id: 1,
                    quantity,
                },
            ],
        };

        // 6 + 6 exceeds the 10 in stock even though each line alone fits.
        let err = SalesService::record(&mut shop, &session, split(6), now())
            .expect_err("combined oversell must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(shop.product(1).unwrap().quantity, 10);

        // 4 + 4 fits and both lines decrement the same product.
        let id = SalesService::record(&mut shop, &session, split(4), now()).expect("record");
        assert_eq!(shop.product(1).unwrap().quantity, 2);
        assert_eq!(SalesService::get(&shop, id).unwrap().items.len(), 2);
    }

    #[test]
    fn refund_restores_stock_and_requires_admin() {
        let (mut shop, session) = shop_with_rep(false);
        let id = SalesService::record(&mut shop, &session, draft(4), now()).expect("record");

        let denied = SalesService::refund(&mut shop, &session, id);
        assert!(matches!(denied, Err(ServiceError::Forbidden)));

        let (mut shop, admin) = shop_with_rep(true);
        let id = SalesService::record(&mut shop, &admin, draft(4), now()).expect("record");
        SalesService::refund(&mut shop, &admin, id).expect("refund");
        assert_eq!(shop.product(1).unwrap().quantity, 10);
        assert!(shop.sale(id).is_none());
    }

    #[test]
    fn delete_removes_the_sale_without_restocking() {
        let (mut shop, admin) = shop_with_rep(true);
        let id = SalesService::record(&mut shop, &admin, draft(4), now()).expect("record");
        SalesService::delete(&mut shop, &admin, id).expect("delete");
        assert_eq!(shop.product(1).unwrap().quantity, 6);
        assert!(shop.sale(id).is_none());
    }
}
