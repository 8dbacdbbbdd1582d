//! JSON storage behavior: round trips, backups, retention, and restore.

mod common;

use chrono::NaiveDate;
use common::setup_test_env;
use shopfront_core::domain::Product;
use shopfront_core::errors::StoreError;

#[test]
fn shop_round_trips_with_its_records() {
    let (mut manager, _config) = setup_test_env();
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    manager.create("Western Stores");
    manager
        .with_current_mut(|shop| {
            shop.company.name = "Western Stores".into();
            shop.add_product(Product::new("Soap", "SP-1", 50.0, 35.0, 10, date, date));
        })
        .unwrap();
    manager.save().expect("save shop");

    manager.close();
    manager.load("Western Stores").expect("reload shop");
    manager
        .with_current(|shop| {
            assert_eq!(shop.company.name, "Western Stores");
            assert_eq!(shop.products.len(), 1);
            assert_eq!(shop.products[0].name, "Soap");
        })
        .unwrap();
}

#[test]
fn loading_a_missing_shop_is_not_found() {
    let (mut manager, _config) = setup_test_env();
    let err = manager.load("nowhere").expect_err("load must fail");
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn listing_uses_canonical_names() {
    let (mut manager, _config) = setup_test_env();
    manager.create("Western Stores");
    manager.save().expect("save first");
    manager.create("corner shop");
    manager.save().expect("save second");

    let shops = manager.storage().list_shops().expect("list");
    assert_eq!(shops, vec!["corner-shop", "western-stores"]);
}

#[test]
fn resaving_backs_up_the_previous_file() {
    let (mut manager, _config) = setup_test_env();
    manager.create("demo");
    manager.save().expect("first save");
    manager
        .with_current_mut(|shop| shop.company.name = "Second".into())
        .unwrap();
    manager.save().expect("second save");

    let backups = manager.storage().list_backups("demo").expect("list backups");
    assert!(!backups.is_empty(), "overwrite must leave a backup behind");
}

#[test]
fn explicit_backup_can_be_restored() {
    let (mut manager, _config) = setup_test_env();
    manager.create("demo");
    manager
        .with_current_mut(|shop| shop.company.name = "Before".into())
        .unwrap();
    manager.save().expect("save");

    let info = {
        let shop = manager.current.as_ref().expect("shop open");
        manager.storage().backup(shop, "demo").expect("backup")
    };

    manager
        .with_current_mut(|shop| shop.company.name = "After".into())
        .unwrap();
    manager.save().expect("save changed");

    let restored = manager.storage().restore(&info).expect("restore");
    assert_eq!(restored.company.name, "Before");
}

#[test]
fn retention_caps_the_backup_count() {
    let (mut manager, _config) = setup_test_env();
    manager.create("demo");
    manager.save().expect("initial save");
    for round in 0..6 {
        let shop = manager.current.as_ref().expect("shop open");
        manager
            .storage()
            .backup(shop, "demo")
            .unwrap_or_else(|err| panic!("backup round {round}: {err}"));
    }
    let backups = manager.storage().list_backups("demo").expect("list backups");
    assert!(
        backups.len() <= 3,
        "retention of 3 exceeded: {} backups",
        backups.len()
    );
}
