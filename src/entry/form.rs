//! The record entry form and the category options that depend on the chosen kind.

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    record::Kind,
};

/// The id of the element wrapping the category select, replaced when the kind changes.
const CATEGORY_FIELD_ID: &str = "category-field";

/// Renders the form for entering a new record.
///
/// The date defaults to `today` and the kind defaults to expense.
pub fn record_form(today: Date) -> Markup {
    let default_kind = Kind::Expense;
    let spinner = loading_spinner();
    let category_target = format!("#{CATEGORY_FIELD_ID}");

    html! {
        form
            hx-post=(endpoints::RECORDS_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "New Transaction" }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for kind in Kind::ALL {
                        @let id = format!("kind-{}", kind.label().to_lowercase());

                        div class="flex items-center gap-3"
                        {
                            input
                                name="kind"
                                id=(id)
                                type="radio"
                                value=(kind.label())
                                checked[kind == default_kind]
                                required
                                hx-get=(endpoints::CATEGORY_OPTIONS)
                                hx-trigger="change"
                                hx-target=(category_target)
                                hx-swap="outerHTML"
                                class=(FORM_RADIO_INPUT_STYLE);

                            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (kind.label()) }
                        }
                    }
                }
            }

            (category_field(default_kind))

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="item" class=(FORM_LABEL_STYLE) { "Item" }

                input
                    name="item"
                    id="item"
                    type="text"
                    placeholder="e.g. coffee"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (spinner) }
                " Save"
            }
        }
    }
}

/// Renders the labelled category select for `kind`, the first category selected.
pub fn category_field(kind: Kind) -> Markup {
    html! {
        div id=(CATEGORY_FIELD_ID)
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in kind.categories() {
                    option value=(category) { (category) }
                }
            }
        }
    }
}

/// The query string for the category options of a kind, e.g. `?kind=Income`.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// The kind whose categories are listed.
    pub kind: Kind,
}

/// Returns the category field for the kind in the query string, e.g. `?kind=Income`.
pub async fn get_category_options(Query(query): Query<CategoryQuery>) -> Response {
    category_field(query.kind).into_response()
}
