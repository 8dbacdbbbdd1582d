//! Aggregation over real shop data: positional series, distinct customers,
//! and the zero-sales ambiguity.

use chrono::{NaiveDate, NaiveDateTime};
use shopfront_core::core::services::{AuthService, LineDraft, SaleDraft, SalesService};
use shopfront_core::domain::{PaymentMethod, Product, Session, Shop};
use shopfront_core::reporting::{aggregate, resolve, DashboardState, PeriodToken, SalesQuery};

fn stamp(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn shop_with_rep() -> (Shop, Session) {
    let mut shop = Shop::new("Aggregation");
    let now = stamp(2024, 3, 1, 8);
    AuthService::register(&mut shop, "rep@example.com", "Rhoda", "Eze", "pw", false, now)
        .expect("register rep");
    let session = AuthService::login(&mut shop, "rep@example.com", "pw", now).expect("login rep");
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    shop.add_product(Product::new("Soap", "SP-1", 50.0, 35.0, 1000, date, date));
    (shop, session)
}

fn record(shop: &mut Shop, session: &Session, customer: &str, quantity: u32, at: NaiveDateTime) {
    let draft = SaleDraft {
        customer_name: customer.into(),
        payment_method: PaymentMethod::Cash,
        lines: vec![LineDraft {
            product_id: 1,
            quantity,
        }],
    };
    SalesService::record(shop, session, draft, at).expect("record sale");
}

#[test]
fn empty_shop_aggregates_to_zeros() {
    let shop = Shop::new("Empty");
    let period = resolve(&PeriodToken::CurrentWeek, stamp(2024, 3, 15, 10));
    let computed = aggregate(&shop, &period);
    assert_eq!(computed.result.totals.revenue_total, 0.0);
    assert_eq!(computed.result.totals.sales_total, 0.0);
    assert_eq!(computed.result.totals.customer_count, 0);
    assert_eq!(computed.result.series, vec![0.0; 7]);
}

#[test]
fn week_series_lines_up_with_day_buckets() {
    let (mut shop, session) = shop_with_rep();
    // Week of Sunday 2024-03-10: sales on Sunday, Tuesday, and Friday.
    record(&mut shop, &session, "Ada", 1, stamp(2024, 3, 10, 9)); // 50
    record(&mut shop, &session, "Ben", 2, stamp(2024, 3, 12, 13)); // 100
    record(&mut shop, &session, "Chi", 3, stamp(2024, 3, 15, 17)); // 150

    let period = resolve(&PeriodToken::CurrentWeek, stamp(2024, 3, 15, 18));
    let computed = aggregate(&shop, &period);
    assert_eq!(
        computed.result.series,
        vec![50.0, 0.0, 100.0, 0.0, 0.0, 150.0, 0.0]
    );
    assert_eq!(computed.result.totals.sales_total, 300.0);
}

#[test]
fn customers_are_counted_once_regardless_of_case() {
    let (mut shop, session) = shop_with_rep();
    record(&mut shop, &session, "Ada", 1, stamp(2024, 3, 11, 9));
    record(&mut shop, &session, "ada", 1, stamp(2024, 3, 12, 9));
    record(&mut shop, &session, "Ben", 1, stamp(2024, 3, 13, 9));

    let totals = shop
        .period_totals(resolve(&PeriodToken::CurrentWeek, stamp(2024, 3, 15, 10)).range.as_ref())
        .expect("totals");
    assert_eq!(totals.customer_count, 2);
}

#[test]
fn totals_filter_by_range_while_all_time_does_not() {
    let (mut shop, session) = shop_with_rep();
    record(&mut shop, &session, "Ada", 1, stamp(2023, 6, 1, 9));
    record(&mut shop, &session, "Ben", 1, stamp(2024, 3, 12, 9));

    let now = stamp(2024, 3, 15, 10);
    let week = aggregate(&shop, &resolve(&PeriodToken::CurrentWeek, now));
    assert_eq!(week.result.totals.sales_total, 50.0);

    let all = aggregate(&shop, &resolve(&PeriodToken::All, now));
    assert_eq!(all.result.totals.sales_total, 100.0);
    // Year buckets: 2021..2024, positionally.
    assert_eq!(all.result.series, vec![0.0, 0.0, 50.0, 50.0]);
}

#[test]
fn revenue_is_margin_not_price() {
    let (mut shop, session) = shop_with_rep();
    record(&mut shop, &session, "Ada", 4, stamp(2024, 3, 12, 9));

    let computed = aggregate(&shop, &resolve(&PeriodToken::All, stamp(2024, 3, 15, 10)));
    assert_eq!(computed.result.totals.sales_total, 200.0);
    assert_eq!(computed.result.totals.revenue_total, 60.0);
}

#[test]
fn switching_period_discards_the_inflight_aggregate() {
    let (mut shop, session) = shop_with_rep();
    record(&mut shop, &session, "Ada", 1, stamp(2024, 3, 12, 9));

    let mut state = DashboardState::new(PeriodToken::CurrentWeek);
    let computed = aggregate(&shop, &resolve(state.selected(), stamp(2024, 3, 15, 10)));

    // The user switches periods before the result lands.
    state.select(PeriodToken::Today);
    assert!(state.accept(computed).is_none());

    let fresh = aggregate(&shop, &resolve(state.selected(), stamp(2024, 3, 15, 10)));
    assert!(state.accept(fresh).is_some());
}
