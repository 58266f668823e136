//! Dashboard module
//!
//! This module provides the dashboard page with the income, expense and
//! balance totals, charts of expenses by category and daily totals, and the
//! history of every record.

mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
