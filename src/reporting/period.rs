//! Period resolution for the dashboard and reporting screens.
//!
//! A period token selects a reporting window relative to `now`. Resolution is
//! pure date arithmetic: the same `(token, now)` pair always produces the
//! same range, buckets, and display text.
//!
//! Two conventions are inherited from the desktop application and preserved
//! deliberately: weeks start on Sunday, and the four "Week N" buckets of a
//! month are computed independently from `start_of_month + N weeks`, so they
//! are not guaranteed to cover the month exactly or to be disjoint.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const HOUR_BAND_LABELS: [&str; 4] = ["12 AM", "6 AM", "12 PM", "6 PM"];

/// Long date format used in period captions, e.g. `Mar 15, 2024`.
const CAPTION_DATE_FORMAT: &str = "%b %-d, %Y";

/// Symbolic reporting window selected from the period dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PeriodToken {
    Today,
    CurrentWeek,
    CurrentMonth,
    CurrentYear,
    PastWeek,
    PastMonth,
    PastYear,
    All,
    /// Unrecognized input is carried through as literal display text rather
    /// than rejected; resolution falls back to the all-time shape.
    Other(String),
}

impl PeriodToken {
    /// Parses the dropdown token strings used by the desktop pages.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "today" => PeriodToken::Today,
            "current-week" => PeriodToken::CurrentWeek,
            "current-month" => PeriodToken::CurrentMonth,
            "current-year" => PeriodToken::CurrentYear,
            "past-week" => PeriodToken::PastWeek,
            "past-month" => PeriodToken::PastMonth,
            "past-year" => PeriodToken::PastYear,
            "all" => PeriodToken::All,
            other => PeriodToken::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PeriodToken::Today => "today",
            PeriodToken::CurrentWeek => "current-week",
            PeriodToken::CurrentMonth => "current-month",
            PeriodToken::CurrentYear => "current-year",
            PeriodToken::PastWeek => "past-week",
            PeriodToken::PastMonth => "past-month",
            PeriodToken::PastYear => "past-year",
            PeriodToken::All => "all",
            PeriodToken::Other(raw) => raw,
        }
    }

    /// Dropdown title shown for the selected period.
    pub fn title(&self) -> String {
        match self {
            PeriodToken::Today => "Today".into(),
            PeriodToken::CurrentWeek => "This Week".into(),
            PeriodToken::CurrentMonth => "This Month".into(),
            PeriodToken::CurrentYear => "This Year".into(),
            PeriodToken::PastWeek => "Last Week".into(),
            PeriodToken::PastMonth => "Last Month".into(),
            PeriodToken::PastYear => "Last Year".into(),
            PeriodToken::All => "All Time".into(),
            PeriodToken::Other(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Filter backing one chart bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum BucketPredicate {
    /// Records on `day` whose hour falls in `[start_hour, end_hour)`.
    HourBand {
        day: NaiveDate,
        start_hour: u32,
        end_hour: u32,
    },
    /// Records on exactly this date.
    Day(NaiveDate),
    /// Records within an inclusive date range.
    Range(DateRange),
    /// Records in a given month of a given year.
    Month { year: i32, month: u32 },
    /// Records in a given year.
    Year(i32),
}

impl BucketPredicate {
    /// Tests a record timestamp against the predicate.
    pub fn matches(&self, at: NaiveDateTime) -> bool {
        match self {
            BucketPredicate::HourBand {
                day,
                start_hour,
                end_hour,
            } => at.date() == *day && *start_hour <= at.hour() && at.hour() < *end_hour,
            BucketPredicate::Day(day) => at.date() == *day,
            BucketPredicate::Range(range) => range.contains(at.date()),
            BucketPredicate::Month { year, month } => {
                at.year() == *year && at.month() == *month
            }
            BucketPredicate::Year(year) => at.year() == *year,
        }
    }
}

/// A labelled sub-interval of the overall period, backing one chart point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketSpec {
    pub label: String,
    pub predicate: BucketPredicate,
}

impl BucketSpec {
    fn new(label: impl Into<String>, predicate: BucketPredicate) -> Self {
        Self {
            label: label.into(),
            predicate,
        }
    }
}

/// Everything the dashboard needs for one period selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPeriod {
    pub token: PeriodToken,
    /// `None` means no date filter is applied (all-time).
    pub range: Option<DateRange>,
    pub buckets: Vec<BucketSpec>,
    /// Dropdown title, e.g. `This Week`.
    pub title: String,
    /// Formatted range text, e.g. `Mar 10, 2024 - Mar 15, 2024`.
    pub caption: String,
}

/// Resolves a period token relative to `now`. Total function: every token,
/// including unrecognized ones, yields a usable period.
pub fn resolve(token: &PeriodToken, now: NaiveDateTime) -> ResolvedPeriod {
    let today = now.date();
    let title = token.title();

    let (range, buckets, caption) = match token {
        PeriodToken::Today => (
            Some(DateRange::new(today, today)),
            hour_band_buckets(today),
            format_date(today),
        ),
        PeriodToken::CurrentWeek => {
            let start = start_of_week(today);
            (
                Some(DateRange::new(start, today)),
                day_buckets(start),
                format_span(start, today),
            )
        }
        PeriodToken::CurrentMonth => {
            let start = start_of_month(today);
            (
                Some(DateRange::new(start, today)),
                month_week_buckets(start, end_of_month(start)),
                format_span(start, today),
            )
        }
        PeriodToken::CurrentYear => {
            let start = start_of_year(today);
            (
                Some(DateRange::new(start, today)),
                month_buckets(today.year()),
                format_span(start, today),
            )
        }
        PeriodToken::PastWeek => {
            let start = start_of_week(today) - Duration::days(7);
            let end = start + Duration::days(6);
            (
                Some(DateRange::new(start, end)),
                day_buckets(start),
                format_span(start, end),
            )
        }
        PeriodToken::PastMonth => {
            let start = shift_month_start(start_of_month(today), -1);
            let end = start_of_month(today) - Duration::days(1);
            (
                Some(DateRange::new(start, end)),
                month_week_buckets(start, end),
                format_span(start, end),
            )
        }
        PeriodToken::PastYear => {
            let year = today.year() - 1;
            let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
            let end = start_of_year(today) - Duration::days(1);
            (
                Some(DateRange::new(start, end)),
                month_buckets(year),
                format_span(start, end),
            )
        }
        PeriodToken::All => (None, year_buckets(today.year()), "From first sale".into()),
        PeriodToken::Other(raw) => (None, year_buckets(today.year()), raw.clone()),
    };

    ResolvedPeriod {
        token: token.clone(),
        range,
        buckets,
        title,
        caption,
    }
}

/// Sunday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Saturday of the week containing `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(6)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    shift_month_start(start_of_month(date), 1) - Duration::days(1)
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// First of the month `delta` months away from `date`'s month.
fn shift_month_start(date: NaiveDate, delta: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + delta;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(date)
}

fn format_date(date: NaiveDate) -> String {
    date.format(CAPTION_DATE_FORMAT).to_string()
}

fn format_span(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}

/// Four contiguous quarter-day bands partitioning the 24-hour day.
fn hour_band_buckets(day: NaiveDate) -> Vec<BucketSpec> {
    HOUR_BAND_LABELS
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let start_hour = index as u32 * 6;
            BucketSpec::new(
                *label,
                BucketPredicate::HourBand {
                    day,
                    start_hour,
                    end_hour: start_hour + 6,
                },
            )
        })
        .collect()
}

/// One bucket per calendar day, Sunday through Saturday from `week_start`.
fn day_buckets(week_start: NaiveDate) -> Vec<BucketSpec> {
    DAY_LABELS
        .iter()
        .enumerate()
        .map(|(offset, label)| {
            BucketSpec::new(
                *label,
                BucketPredicate::Day(week_start + Duration::days(offset as i64)),
            )
        })
        .collect()
}

/// Four week-aligned sub-ranges spanning a month.
///
/// Bucket boundaries are computed per bucket: the first starts at the first
/// of the month, the last is clamped to the month end, and the middle ones
/// snap to the Sunday..Saturday week around `month_start + N weeks`. Months
/// that do not align to four whole weeks produce gaps or overlaps.
fn month_week_buckets(month_start: NaiveDate, month_end: NaiveDate) -> Vec<BucketSpec> {
    (0..4u32)
        .map(|index| {
            let anchor = month_start + Duration::weeks(index as i64);
            let start = if index == 0 {
                month_start
            } else {
                start_of_week(anchor)
            };
            let end = if index == 3 {
                month_end
            } else {
                end_of_week(anchor)
            };
            BucketSpec::new(
                format!("Week {}", index + 1),
                BucketPredicate::Range(DateRange::new(start, end)),
            )
        })
        .collect()
}

/// Twelve month-equality buckets for the given year, labelled Jan..Dec.
fn month_buckets(year: i32) -> Vec<BucketSpec> {
    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(index, label)| {
            BucketSpec::new(
                *label,
                BucketPredicate::Month {
                    year,
                    month: index as u32 + 1,
                },
            )
        })
        .collect()
}

/// The last four calendar years ending at `current_year`.
fn year_buckets(current_year: i32) -> Vec<BucketSpec> {
    (0..4)
        .rev()
        .map(|offset| {
            let year = current_year - offset;
            BucketSpec::new(year.to_string(), BucketPredicate::Year(year))
        })
        .collect()
}
