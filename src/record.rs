//! The transaction record, its kind and the category catalogue.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// Whether a record is money spent or money earned.
///
/// The derived ordering puts expenses before income, which is the order the
/// dashboard groups and lists them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// Money spent.
    #[serde(alias = "รายจ่าย", alias = "expense")]
    Expense,
    /// Money earned.
    #[serde(alias = "รายรับ", alias = "income")]
    Income,
}

const EXPENSE_CATEGORIES: [&str; 5] = ["Food", "Transport", "Shopping", "Bills/Utilities", "Other"];
const INCOME_CATEGORIES: [&str; 4] = ["Salary", "Bonus", "Investment", "Other"];

impl Kind {
    /// Every kind, in display order.
    pub const ALL: [Kind; 2] = [Kind::Expense, Kind::Income];

    /// The label written to the `Type` column and shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Kind::Expense => "Expense",
            Kind::Income => "Income",
        }
    }

    /// The categories offered by the entry form for this kind.
    ///
    /// Advisory only: the store accepts any category for any kind.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Kind::Expense => &EXPENSE_CATEGORIES,
            Kind::Income => &INCOME_CATEGORIES,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One income or expense entry.
///
/// Records are only ever created and appended, never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// The day the money moved.
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    /// A free text label, e.g. "coffee". May be empty.
    pub item: String,
    /// The category, e.g. "Food".
    pub category: String,
    /// Whether the record is an expense or income.
    pub kind: Kind,
    /// The non-negative amount of money.
    pub amount: Decimal,
}

impl Record {
    /// Create a new record.
    pub fn new(date: Date, item: &str, category: &str, kind: Kind, amount: Decimal) -> Self {
        Self {
            date,
            item: item.to_owned(),
            category: category.to_owned(),
            kind,
            amount,
        }
    }
}

const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const SLASH_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]/[month]/[day]");

/// Parse a stored date string into a calendar date.
///
/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`. A trailing time component, e.g.
/// `2024-01-01 00:00:00` or `2024-01-01T08:30:00`, is dropped.
///
/// Returns `None` if `text` is not a valid date.
pub fn parse_date(text: &str) -> Option<Date> {
    let date_part = text
        .trim()
        .split([' ', 'T'])
        .next()
        .unwrap_or_default();

    Date::parse(date_part, ISO_DATE_FORMAT)
        .or_else(|_| Date::parse(date_part, SLASH_DATE_FORMAT))
        .ok()
}

/// Serialize a date as `YYYY-MM-DD`.
pub(crate) fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(date)
}

/// Deserialize a date with [parse_date].
pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_date(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date \"{text}\"")))
}

/// Deserialize a decimal from its text form, ignoring surrounding whitespace.
pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    text.trim()
        .parse::<Decimal>()
        .map_err(|error| serde::de::Error::custom(format!("invalid amount \"{text}\": {error}")))
}
