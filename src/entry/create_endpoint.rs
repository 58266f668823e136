//! Defines the endpoint for appending a new record.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    record::{Kind, Record, deserialize_amount, deserialize_date},
    store::SharedStore,
};

/// The state needed to append a record.
#[derive(Clone)]
pub struct CreateRecordState {
    /// The store that owns the persisted records.
    pub store: SharedStore,
}

impl FromRef<AppState> for CreateRecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The form data for entering a record.
#[derive(Debug, Deserialize)]
pub struct RecordForm {
    /// The day the money moved.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Date,
    /// What the money was for. May be left blank.
    #[serde(default)]
    pub item: String,
    /// Expense or income.
    pub kind: Kind,
    /// One of the categories offered for `kind`, though any text is accepted.
    pub category: String,
    /// The amount of money, never negative.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
}

/// A route handler for appending a record, redirects to the dashboard on success.
pub async fn create_record_endpoint(
    State(state): State<CreateRecordState>,
    Form(form): Form<RecordForm>,
) -> Response {
    if form.amount < Decimal::ZERO {
        tracing::warn!("Rejected record with negative amount {}", form.amount);
        return Error::NegativeAmount(form.amount).into_alert_response();
    }

    let record = Record::new(form.date, &form.item, &form.category, form.kind, form.amount);

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.append(record) {
        Ok(records) => tracing::info!(
            "Recorded {} of {} on {}, {} records in total",
            form.kind,
            form.amount,
            form.date,
            records.len()
        ),
        Err(error) => {
            tracing::error!("could not append record: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
