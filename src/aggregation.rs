//! Totals, groupings and orderings derived from a loaded collection of records.
//!
//! Everything here is a pure function of the collection. Nothing is cached:
//! the dashboard recomputes every view from the full collection on each request.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    record::{Kind, Record, serialize_date},
};

/// Adds `amount` to `total`, failing instead of panicking when the sum no
/// longer fits in a [Decimal].
fn add_amount(total: &mut Decimal, amount: Decimal) -> Result<(), Error> {
    *total = total.checked_add(amount).ok_or(Error::AmountOverflow)?;
    Ok(())
}

/// Sums the amounts of the records of the given `kind`.
///
/// Returns zero for an empty collection or when no record has that kind.
///
/// # Errors
///
/// Returns [Error::AmountOverflow] if the total is too large to represent.
pub fn total_by_kind(records: &[Record], kind: Kind) -> Result<Decimal, Error> {
    let mut total = Decimal::ZERO;

    for record in records.iter().filter(|record| record.kind == kind) {
        add_amount(&mut total, record.amount)?;
    }

    Ok(total)
}

/// Total income minus total expenses.
pub fn balance(records: &[Record]) -> Result<Decimal, Error> {
    let total_income = total_by_kind(records, Kind::Income)?;
    let total_expense = total_by_kind(records, Kind::Expense)?;

    total_income
        .checked_sub(total_expense)
        .ok_or(Error::AmountOverflow)
}

/// Sums expense amounts per category.
///
/// Income records are ignored. The map is empty when there are no expenses,
/// which callers should treat as "nothing to chart" rather than a chart with
/// no slices.
pub fn expense_by_category(records: &[Record]) -> Result<BTreeMap<String, Decimal>, Error> {
    let mut totals = BTreeMap::new();

    for record in records.iter().filter(|record| record.kind == Kind::Expense) {
        let total = totals
            .entry(record.category.clone())
            .or_insert(Decimal::ZERO);
        add_amount(total, record.amount)?;
    }

    Ok(totals)
}

/// The sum of the amounts of one kind on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    /// The day.
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    /// Whether this is the day's expense or income total.
    pub kind: Kind,
    /// The summed amount.
    pub amount: Decimal,
}

/// Sums amounts per `(date, kind)` pair.
///
/// Expenses and income on the same day are separate groups. The result is
/// ordered by date, then by kind with expenses first.
pub fn daily_totals(records: &[Record]) -> Result<Vec<DailyTotal>, Error> {
    let mut totals: BTreeMap<(Date, Kind), Decimal> = BTreeMap::new();

    for record in records {
        let total = totals
            .entry((record.date, record.kind))
            .or_insert(Decimal::ZERO);
        add_amount(total, record.amount)?;
    }

    Ok(totals
        .into_iter()
        .map(|((date, kind), amount)| DailyTotal { date, kind, amount })
        .collect())
}

/// The records ordered newest first.
///
/// The sort is stable, so records on the same date keep their insertion order.
pub fn sorted_descending_by_date(records: &[Record]) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Income, expense and balance totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum of all income.
    pub total_income: Decimal,
    /// Sum of all expenses.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub balance: Decimal,
}

/// Computes the [Summary] of `records`.
pub fn summarize(records: &[Record]) -> Result<Summary, Error> {
    let total_income = total_by_kind(records, Kind::Income)?;
    let total_expense = total_by_kind(records, Kind::Expense)?;

    Ok(Summary {
        total_income,
        total_expense,
        balance: balance(records)?,
    })
}

/// Daily totals pivoted into one value per date for each kind, for charting.
#[derive(Debug, PartialEq)]
pub(crate) struct DailySeries {
    /// The distinct dates in ascending order.
    pub dates: Vec<Date>,
    /// The expense total for each date in `dates`, `None` if there were no expenses that day.
    pub expenses: Vec<Option<Decimal>>,
    /// The income total for each date in `dates`, `None` if there was no income that day.
    pub income: Vec<Option<Decimal>>,
}

/// Pivots the output of [daily_totals] into aligned per-kind series.
pub(crate) fn daily_series(totals: &[DailyTotal]) -> DailySeries {
    let mut dates: Vec<Date> = totals.iter().map(|total| total.date).collect();
    dates.sort();
    dates.dedup();

    let lookup: BTreeMap<(Date, Kind), Decimal> = totals
        .iter()
        .map(|total| ((total.date, total.kind), total.amount))
        .collect();

    let series_for = |kind: Kind| -> Vec<Option<Decimal>> {
        dates
            .iter()
            .map(|date| lookup.get(&(*date, kind)).copied())
            .collect()
    };

    DailySeries {
        expenses: series_for(Kind::Expense),
        income: series_for(Kind::Income),
        dates,
    }
}
