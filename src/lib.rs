//! Cashbook is a web app for tracking personal income and expenses.
//!
//! Every transaction is appended to a single CSV file. The dashboard reloads
//! the whole file on each request and shows the income, expense and balance
//! totals, a chart of expenses by category, a chart of daily totals and the
//! full history, newest first.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod entry;
mod error;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod record;
mod routing;
mod store;
mod summary;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use aggregation::{
    DailyTotal, Summary, balance, daily_totals, expense_by_category, sorted_descending_by_date,
    summarize, total_by_kind,
};
pub use app_state::AppState;
pub use error::Error;
pub use record::{Kind, Record, parse_date};
pub use routing::build_router;
pub use store::{CsvStore, RecordStore, SharedStore};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
