//! Dashboard refresh: period resolution plus aggregation in one call.

use chrono::NaiveDateTime;

use crate::domain::Shop;
use crate::reporting::{aggregate, resolve, DashboardState, PeriodToken};

/// Everything the dashboard page renders for one period selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub token: PeriodToken,
    pub title: String,
    pub caption: String,
    pub revenue_total: f64,
    pub sales_total: f64,
    pub customer_count: u64,
    pub labels: Vec<String>,
    pub series: Vec<f64>,
}

pub struct DashboardService;

impl DashboardService {
    /// Computes the full dashboard view for a period selection.
    pub fn refresh(shop: &Shop, token: &PeriodToken, now: NaiveDateTime) -> DashboardView {
        let period = resolve(token, now);
        let labels = period
            .buckets
            .iter()
            .map(|bucket| bucket.label.clone())
            .collect();
        let aggregate = aggregate(shop, &period);
        DashboardView {
            token: aggregate.token,
            title: period.title,
            caption: period.caption,
            revenue_total: aggregate.result.totals.revenue_total,
            sales_total: aggregate.result.totals.sales_total,
            customer_count: aggregate.result.totals.customer_count,
            labels,
            series: aggregate.result.series,
        }
    }

    /// Computes the view for the currently selected period, running the
    /// aggregate through the stale-result guard.
    pub fn refresh_selected(
        shop: &Shop,
        state: &DashboardState,
        now: NaiveDateTime,
    ) -> Option<DashboardView> {
        let view = Self::refresh(shop, state.selected(), now);
        // The guard rejects the view if the selection changed underneath us.
        if &view.token == state.selected() {
            Some(view)
        } else {
            None
        }
    }
}
