//! Sales aggregation over a resolved period.
//!
//! One totals query covers the full range; one query per bucket fills the
//! chart series. Buckets are independent and assembled positionally, so the
//! backing queries may run in any order. A failed totals query degrades to
//! zeros for all three summary metrics; a failed bucket query degrades to
//! zero for that bucket only.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::Shop;
use crate::errors::StoreError;

use super::period::{BucketPredicate, DateRange, PeriodToken, ResolvedPeriod};

/// Summary metrics for the overall period range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodTotals {
    /// Sum of per-sale revenue (margin) in the range.
    pub revenue_total: f64,
    /// Sum of per-sale total price in the range.
    pub sales_total: f64,
    /// Number of distinct customers in the range.
    pub customer_count: u64,
}

/// Storage capability the aggregator consumes. Implementations answer the
/// totals query for an optional inclusive range (`None` means no filter) and
/// the per-bucket price sum for a typed predicate.
pub trait SalesQuery {
    fn period_totals(&self, range: Option<&DateRange>) -> Result<PeriodTotals, StoreError>;
    fn bucket_total(&self, predicate: &BucketPredicate) -> Result<f64, StoreError>;
}

/// Summary metrics plus the chart series, aligned with the bucket labels of
/// the resolved period.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub totals: PeriodTotals,
    pub series: Vec<f64>,
}

/// An aggregate tagged with the token it was computed for, so a late result
/// for a superseded period selection can be recognized and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodAggregate {
    pub token: PeriodToken,
    pub result: AggregateResult,
}

/// Runs the totals query and the per-bucket queries for a resolved period.
///
/// Never fails: query errors are logged and degrade to zeros, which renders
/// the same as "no sales" (an inherited ambiguity the screens rely on).
pub fn aggregate<Q: SalesQuery + ?Sized>(query: &Q, period: &ResolvedPeriod) -> PeriodAggregate {
    let totals = match query.period_totals(period.range.as_ref()) {
        Ok(totals) => totals,
        Err(err) => {
            warn!(token = %period.token, error = %err, "period totals query failed");
            PeriodTotals::default()
        }
    };

    let series = period
        .buckets
        .iter()
        .map(|bucket| match query.bucket_total(&bucket.predicate) {
            Ok(total) => total,
            Err(err) => {
                warn!(
                    token = %period.token,
                    bucket = %bucket.label,
                    error = %err,
                    "bucket query failed"
                );
                0.0
            }
        })
        .collect();

    PeriodAggregate {
        token: period.token.clone(),
        result: AggregateResult { totals, series },
    }
}

/// Tracks the currently selected period and filters out stale aggregates.
///
/// A period change supersedes any aggregation still in flight; when that
/// older result arrives its token no longer matches and it is dropped
/// instead of overwriting the newer display.
#[derive(Debug, Clone)]
pub struct DashboardState {
    selected: PeriodToken,
}

impl DashboardState {
    pub fn new(selected: PeriodToken) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> &PeriodToken {
        &self.selected
    }

    /// Switches the current selection, invalidating in-flight aggregates.
    pub fn select(&mut self, token: PeriodToken) {
        self.selected = token;
    }

    /// Accepts an aggregate only if it was computed for the current
    /// selection; stale results yield `None`.
    pub fn accept(&self, aggregate: PeriodAggregate) -> Option<AggregateResult> {
        if aggregate.token == self.selected {
            Some(aggregate.result)
        } else {
            warn!(
                stale = %aggregate.token,
                selected = %self.selected,
                "discarding stale aggregate"
            );
            None
        }
    }
}

impl SalesQuery for Shop {
    fn period_totals(&self, range: Option<&DateRange>) -> Result<PeriodTotals, StoreError> {
        let mut totals = PeriodTotals::default();
        let mut customers = HashSet::new();
        for sale in &self.sales {
            if let Some(range) = range {
                if !range.contains(sale.purchase_time.date()) {
                    continue;
                }
            }
            totals.revenue_total += sale.total_revenue;
            totals.sales_total += sale.total_price;
            customers.insert(sale.customer_name.to_lowercase());
        }
        totals.customer_count = customers.len() as u64;
        Ok(totals)
    }

    fn bucket_total(&self, predicate: &BucketPredicate) -> Result<f64, StoreError> {
        Ok(self
            .sales
            .iter()
            .filter(|sale| predicate.matches(sale.purchase_time))
            .map(|sale| sale.total_price)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::period::{resolve, PeriodToken};
    use chrono::NaiveDate;

    struct FailingQuery;

    impl SalesQuery for FailingQuery {
        fn period_totals(&self, _range: Option<&DateRange>) -> Result<PeriodTotals, StoreError> {
            Err(StoreError::InvalidRef("totals unavailable".into()))
        }

        fn bucket_total(&self, _predicate: &BucketPredicate) -> Result<f64, StoreError> {
            Err(StoreError::InvalidRef("bucket unavailable".into()))
        }
    }

    #[test]
    fn query_failures_degrade_to_zeros() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let period = resolve(&PeriodToken::CurrentWeek, now);
        let aggregate = aggregate(&FailingQuery, &period);
        assert_eq!(aggregate.result.totals, PeriodTotals::default());
        assert_eq!(aggregate.result.series, vec![0.0; 7]);
    }

    #[test]
    fn stale_aggregates_are_discarded() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let period = resolve(&PeriodToken::CurrentWeek, now);
        let computed = aggregate(&FailingQuery, &period);

        let mut state = DashboardState::new(PeriodToken::CurrentWeek);
        state.select(PeriodToken::Today);
        assert!(state.accept(computed.clone()).is_none());

        state.select(PeriodToken::CurrentWeek);
        assert!(state.accept(computed).is_some());
    }
}
