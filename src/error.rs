//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The store file exists but could not be opened or read.
    #[error("could not read the record store: {0}")]
    ReadFailure(String),

    /// A row in the store file could not be read as a record, e.g. it has
    /// the wrong number of columns or an unknown type label.
    #[error("the record store is corrupt at line {line}: {reason}")]
    CorruptStore {
        /// The 1-based line number in the store file.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },

    /// A stored date could not be parsed as a calendar date.
    ///
    /// A single malformed date makes the whole collection unreadable so that
    /// totals are never computed over a partial collection.
    #[error("malformed date \"{value}\" at line {line}")]
    MalformedDate {
        /// The 1-based line number in the store file.
        line: u64,
        /// The text that failed to parse.
        value: String,
    },

    /// A stored amount could not be parsed as a decimal number.
    #[error("malformed amount \"{value}\" at line {line}")]
    MalformedAmount {
        /// The 1-based line number in the store file.
        line: u64,
        /// The text that failed to parse.
        value: String,
    },

    /// The store file could not be written, e.g. due to permissions or a full disk.
    #[error("could not write the record store: {0}")]
    WriteFailure(String),

    /// Could not acquire the store lock
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// A negative amount was used to create a record.
    ///
    /// Whether money was spent or earned is given by the kind, so amounts
    /// are never negative.
    #[error("{0} is a negative amount, which is not allowed")]
    NegativeAmount(Decimal),

    /// A total of the stored amounts is too large to represent.
    #[error("the total of the stored amounts is too large to represent")]
    AmountOverflow,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|position| position.line()).unwrap_or(0);

        match error.kind() {
            csv::ErrorKind::Io(io_error) => Error::ReadFailure(io_error.to_string()),
            _ => Error::CorruptStore {
                line,
                reason: error.to_string(),
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::MalformedDate { line, value } => InternalServerError {
                description: "Could not read your records",
                fix: &format!(
                    "The date \"{value}\" on line {line} of the data file is not a valid date. \
                    Fix or remove that line and reload the page."
                ),
            }
            .into_response(),
            Error::MalformedAmount { line, value } => InternalServerError {
                description: "Could not read your records",
                fix: &format!(
                    "The amount \"{value}\" on line {line} of the data file is not a number. \
                    Fix or remove that line and reload the page."
                ),
            }
            .into_response(),
            Error::CorruptStore { line, .. } => InternalServerError {
                description: "Could not read your records",
                fix: &format!(
                    "Line {line} of the data file could not be read. \
                    Check the server logs for more details."
                ),
            }
            .into_response(),
            Error::AmountOverflow => InternalServerError {
                description: "Could not total your records",
                fix: "The amounts in the data file add up to more than can be represented. \
                    Fix or remove the records with very large amounts and reload the page.",
            }
            .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::NegativeAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!(
                        "{amount} is negative. Enter the amount as a positive number \
                        and choose Expense or Income instead."
                    ),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::MalformedDate { line, value } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not save the record".to_owned(),
                    details: format!(
                        "The existing data file has an invalid date \"{value}\" on line {line}."
                    ),
                },
            ),
            Error::MalformedAmount { line, value } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not save the record".to_owned(),
                    details: format!(
                        "The existing data file has an invalid amount \"{value}\" on line {line}."
                    ),
                },
            ),
            Error::WriteFailure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not save the record".to_owned(),
                    details: "The data file could not be written. \
                        Check that the server can write to it and that the disk is not full."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
