//! Dashboard reporting core: period resolution and sales aggregation.
//!
//! `period` turns a symbolic period token into an inclusive date range plus
//! labelled chart buckets; `aggregate` runs the summary and per-bucket
//! queries against a [`SalesQuery`] implementation and assembles the result.

pub mod aggregate;
pub mod period;

pub use aggregate::{
    aggregate, AggregateResult, DashboardState, PeriodAggregate, PeriodTotals, SalesQuery,
};
pub use period::{resolve, BucketPredicate, BucketSpec, DateRange, PeriodToken, ResolvedPeriod};
