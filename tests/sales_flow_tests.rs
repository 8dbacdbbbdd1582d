//! End-to-end flow: accounts, stock, sales, dashboard, refund.

mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::setup_test_env;
use shopfront_core::core::services::{
    AuthService, DashboardService, InventoryService, LineDraft, SaleDraft, SalesService,
    UserService,
};
use shopfront_core::domain::{PaymentMethod, Product};
use shopfront_core::reporting::PeriodToken;

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[test]
fn full_shop_day_survives_a_reload() {
    let (mut manager, _config) = setup_test_env();
    manager.create("western");

    let shop = manager.current.as_mut().expect("shop open");
    AuthService::register(shop, "boss@example.com", "Bola", "Ade", "pw", true, at(8))
        .expect("register admin");
    let admin = AuthService::login(shop, "boss@example.com", "pw", at(8)).expect("login admin");

    UserService::create(
        shop,
        &admin,
        "rep@example.com",
        "Rhoda",
        "Eze",
        "pw",
        false,
        at(8),
    )
    .expect("create rep");
    let rep = AuthService::login(shop, "rep@example.com", "pw", at(9)).expect("login rep");

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let soap = InventoryService::add(
        shop,
        Product::new("Soap", "SP-1", 50.0, 35.0, 20, date, date),
    )
    .expect("add soap");
    let bread = InventoryService::add(
        shop,
        Product::new("Bread", "BR-1", 30.0, 18.0, 5, date, date),
    )
    .expect("add bread");

    let sale_id = SalesService::record(
        shop,
        &rep,
        SaleDraft {
            customer_name: "Ada".into(),
            payment_method: PaymentMethod::Card,
            lines: vec![
                LineDraft {
                    product_id: soap,
                    quantity: 2,
                },
                LineDraft {
                    product_id: bread,
                    quantity: 1,
                },
            ],
        },
        at(10),
    )
    .expect("record sale");

    manager.save().expect("save shop");
    manager.close();
    manager.load("western").expect("reload");

    let shop = manager.current.as_ref().expect("shop open");
    let sale = SalesService::get(shop, sale_id).expect("sale persisted");
    assert_eq!(sale.total_price, 130.0);
    assert_eq!(sale.items.len(), 2);
    assert_eq!(shop.product(soap).unwrap().quantity, 18);
    assert_eq!(shop.product(bread).unwrap().quantity, 4);
    assert_eq!(SalesService::rep_name(shop, sale).as_deref(), Some("Rhoda Eze"));
}

#[test]
fn dashboard_reflects_a_refund() {
    let (mut manager, _config) = setup_test_env();
    manager.create("western");
    let shop = manager.current.as_mut().expect("shop open");

    AuthService::register(shop, "boss@example.com", "Bola", "Ade", "pw", true, at(8))
        .expect("register admin");
    let admin = AuthService::login(shop, "boss@example.com", "pw", at(8)).expect("login");
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let soap = InventoryService::add(
        shop,
        Product::new("Soap", "SP-1", 50.0, 35.0, 20, date, date),
    )
    .expect("add soap");

    let keep = SalesService::record(
        shop,
        &admin,
        SaleDraft {
            customer_name: "Ada".into(),
            payment_method: PaymentMethod::Cash,
            lines: vec![LineDraft {
                product_id: soap,
                quantity: 1,
            }],
        },
        at(9),
    )
    .expect("first sale");
    let refunded = SalesService::record(
        shop,
        &admin,
        SaleDraft {
            customer_name: "Ben".into(),
            payment_method: PaymentMethod::Cash,
            lines: vec![LineDraft {
                product_id: soap,
                quantity: 3,
            }],
        },
        at(14),
    )
    .expect("second sale");

    let before = DashboardService::refresh(shop, &PeriodToken::Today, at(20));
    assert_eq!(before.sales_total, 200.0);
    assert_eq!(before.customer_count, 2);

    SalesService::refund(shop, &admin, refunded).expect("refund");

    let after = DashboardService::refresh(shop, &PeriodToken::Today, at(20));
    assert_eq!(after.sales_total, 50.0);
    assert_eq!(after.customer_count, 1);
    assert_eq!(shop.product(soap).unwrap().quantity, 19);
    assert!(SalesService::get(shop, keep).is_ok());
}
