//! Reports module for budget-dashboard
//!
//! Aggregates the expense table into calendar-month and category buckets.
//! Every report is derived from the full table on demand; nothing is cached
//! on disk.

pub mod category;
pub mod dashboard;
pub mod monthly;

pub use category::{category_totals, CategoryReport, CategoryReportRow, CategoryTotal};
pub use dashboard::Dashboard;
pub use monthly::{monthly_totals, MonthlyReport, MonthlyReportRow, MonthlyTotal};

use crate::models::Money;

/// Share of `part` in `whole`, in percent; 0 when there is nothing to share
pub(crate) fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        (part.cents() as f64 / whole.cents() as f64) * 100.0
    }
}
