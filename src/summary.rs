//! The JSON view of the totals computed over every record.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    AppState, Error,
    aggregation::{DailyTotal, daily_totals, expense_by_category, summarize},
    store::SharedStore,
};

/// The state needed to summarize the records.
#[derive(Clone)]
pub struct SummaryState {
    /// The store that owns the persisted records.
    pub store: SharedStore,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Every aggregate the dashboard shows, in one document.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub expense_by_category: BTreeMap<String, Decimal>,
    pub daily_totals: Vec<DailyTotal>,
}

/// Returns the totals of all records as JSON.
pub async fn get_summary(State(state): State<SummaryState>) -> Result<Response, Error> {
    let records = {
        let store = state
            .store
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map_err(|_| Error::StoreLockError)?;

        store
            .load()
            .inspect_err(|error| tracing::error!("could not load records: {error}"))?
    };

    let summary = summarize(&records)
        .inspect_err(|error| tracing::error!("could not total records: {error}"))?;

    Ok(Json(SummaryResponse {
        total_income: summary.total_income,
        total_expense: summary.total_expense,
        balance: summary.balance,
        expense_by_category: expense_by_category(&records)?,
        daily_totals: daily_totals(&records)?,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        sync::{Arc, Mutex},
    };

    use axum::{extract::State, http::StatusCode};
    use serde_json::{Value, json};

    use crate::{
        Error,
        store::{CsvStore, SharedStore},
        test_utils::TempFile,
    };

    use super::{SummaryState, get_summary};

    fn get_test_state(file: &TempFile) -> SummaryState {
        let store: SharedStore = Arc::new(Mutex::new(CsvStore::new(file.path())));

        SummaryState { store }
    }

    async fn parse_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");

        serde_json::from_slice(&body).expect("Could not parse JSON")
    }

    #[tokio::test]
    async fn summarizes_coffee_and_salary() {
        let file = TempFile::new("summary.csv");
        fs::write(
            file.path(),
            "Date,Item,Category,Type,Amount\n\
            2024-01-01,coffee,Food,Expense,50.00\n\
            2024-01-01,salary,Salary,Income,1000.00\n",
        )
        .unwrap();

        let response = get_summary(State(get_test_state(&file))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            parse_json(response).await,
            json!({
                "total_income": "1000.00",
                "total_expense": "50.00",
                "balance": "950.00",
                "expense_by_category": { "Food": "50.00" },
                "daily_totals": [
                    { "date": "2024-01-01", "kind": "Expense", "amount": "50.00" },
                    { "date": "2024-01-01", "kind": "Income", "amount": "1000.00" },
                ],
            })
        );
    }

    #[tokio::test]
    async fn missing_store_has_zero_totals() {
        let file = TempFile::new("summary_missing.csv");

        let response = get_summary(State(get_test_state(&file))).await.unwrap();

        assert_eq!(
            parse_json(response).await,
            json!({
                "total_income": "0",
                "total_expense": "0",
                "balance": "0",
                "expense_by_category": {},
                "daily_totals": [],
            })
        );
    }

    #[tokio::test]
    async fn malformed_store_is_an_error() {
        let file = TempFile::new("summary_malformed.csv");
        fs::write(
            file.path(),
            "Date,Item,Category,Type,Amount\n2024-01-01,coffee,Food,Expense,fifty\n",
        )
        .unwrap();

        let result = get_summary(State(get_test_state(&file))).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn totals_too_large_to_represent_are_an_error() {
        let file = TempFile::new("summary_overflow.csv");
        fs::write(
            file.path(),
            "Date,Item,Category,Type,Amount\n\
            2024-01-01,house,Other,Expense,79228162514264337593543950335\n\
            2024-01-02,house,Other,Expense,79228162514264337593543950335\n",
        )
        .unwrap();

        let result = get_summary(State(get_test_state(&file))).await;

        assert_eq!(result.err(), Some(Error::AmountOverflow));
    }
}
