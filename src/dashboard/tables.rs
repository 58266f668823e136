//! The history table listing every record, newest first.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    html::{
        EXPENSE_BADGE_STYLE, INCOME_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, format_currency,
    },
    record::{Kind, Record},
};

/// Item labels longer than this many graphemes are cut short in the table.
const MAX_ITEM_GRAPHEMES: usize = 32;

/// Shortens `item` to [MAX_ITEM_GRAPHEMES] graphemes, ending in an ellipsis if cut.
fn truncate_item(item: &str) -> String {
    let graphemes: Vec<&str> = item.graphemes(true).collect();

    if graphemes.len() <= MAX_ITEM_GRAPHEMES {
        item.to_owned()
    } else {
        let mut truncated = graphemes[..MAX_ITEM_GRAPHEMES - 3].concat();
        truncated.push_str("...");
        truncated
    }
}

/// Renders `records` in the given order, one row each.
pub(super) fn history_table(records: &[&Record]) -> Markup {
    html! {
        section id="history" class="w-full mx-auto mb-8"
        {
            h3 class="text-xl font-semibold mb-4" { "History" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Item" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for record in records {
                            (history_row(record))
                        }
                    }
                }
            }
        }
    }
}

fn history_row(record: &Record) -> Markup {
    let badge_style = match record.kind {
        Kind::Expense => EXPENSE_BADGE_STYLE,
        Kind::Income => INCOME_BADGE_STYLE,
    };

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (record.date) }
            td class=(TABLE_CELL_STYLE) title=(record.item) { (truncate_item(&record.item)) }
            td class=(TABLE_CELL_STYLE) { (record.category) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(badge_style) { (record.kind.label()) }
            }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"}
            {
                (format_currency(record.amount))
            }
        }
    }
}
