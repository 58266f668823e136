//! Metric cards for the income, expense and balance totals.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{aggregation::Summary, html::format_currency};

const TEXT_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TEXT_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Renders the three metric cards: total income, total expenses and balance.
pub(super) fn summary_cards_view(summary: &Summary) -> Markup {
    let balance_style = if summary.balance < Decimal::ZERO {
        TEXT_RED_STYLE
    } else {
        TEXT_GREEN_STYLE
    };

    html! {
        section id="summary-cards" class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4"
            {
                (metric_card("Total Income", summary.total_income, TEXT_GREEN_STYLE))
                (metric_card("Total Expenses", summary.total_expense, TEXT_RED_STYLE))
                (metric_card("Balance", summary.balance, balance_style))
            }
        }
    }
}

fn metric_card(title: &str, amount: Decimal, amount_style: &str) -> Markup {
    let amount_text = format_currency(amount);

    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            aria-label=(format!("{title}: {amount_text}"))
        {
            h4 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-2" { (title) }

            div class={"metric-value text-3xl font-bold " (amount_style)} { (amount_text) }
        }
    }
}
