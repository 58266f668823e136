//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The state type used by the handler

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    aggregation::{daily_totals, expense_by_category, sorted_descending_by_date, summarize},
    dashboard::{
        cards::summary_cards_view,
        charts::{
            DashboardChart, charts_script, charts_view, daily_totals_chart, expenses_pie_chart,
        },
        tables::history_table,
    },
    endpoints,
    entry::record_form,
    html::{HeadElement, base, currency_input_styles},
    navigation::NavBar,
    record::Record,
    store::SharedStore,
    timezone::local_today,
};

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Clone)]
pub struct DashboardState {
    /// The store that owns the persisted records.
    pub store: SharedStore,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with the totals, charts and history of every record.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
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

    let today = local_today(&state.local_timezone)?;
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if records.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar, today).into_response());
    }

    let page = dashboard_view(nav_bar, &records, today)
        .inspect_err(|error| tracing::error!("could not total records: {error}"))?;

    Ok(page.into_response())
}

/// Renders the dashboard page when there are no records yet.
fn dashboard_no_data_view(nav_bar: NavBar, today: Date) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto max-w-md text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold" { "Nothing here yet..." }

            p class="mb-6"
            {
                "Totals and charts will show up here once you add some transactions."
            }

            (record_form(today))
        }
    );

    base("Dashboard", &[currency_input_styles()], &content)
}

/// Renders the main dashboard page with cards, charts, history and the entry form.
fn dashboard_view(nav_bar: NavBar, records: &[Record], today: Date) -> Result<Markup, Error> {
    let nav_bar = nav_bar.into_html();
    let summary = summarize(records)?;
    let expenses = expense_by_category(records)?;
    let history = sorted_descending_by_date(records);

    let mut charts = Vec::with_capacity(2);
    if !expenses.is_empty() {
        charts.push(DashboardChart {
            id: "expenses-chart",
            options: expenses_pie_chart(&expenses).to_string(),
        });
    }
    charts.push(DashboardChart {
        id: "daily-totals-chart",
        options: daily_totals_chart(&daily_totals(records)?).to_string(),
    });

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col lg:flex-row gap-6 px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            aside class="w-full lg:w-80 shrink-0"
            {
                (record_form(today))
            }

            div class="flex-1 min-w-0"
            {
                (summary_cards_view(&summary))

                section id="charts" class="w-full mx-auto mb-4"
                {
                    div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                    {
                        @if expenses.is_empty() {
                            div
                                id="expenses-placeholder"
                                class="min-h-[380px] rounded flex items-center justify-center
                                    bg-white dark:bg-gray-800 text-gray-600 dark:text-gray-400"
                            {
                                "No expenses recorded yet"
                            }
                        }

                        (charts_view(&charts))
                    }
                }

                (history_table(&history))
            }
        }
    );

    let head_elements = [
        currency_input_styles(),
        HeadElement::ScriptLink(ECHARTS_CDN.to_owned()),
        charts_script(&charts),
    ];

    Ok(base("Dashboard", &head_elements, &content))
}
