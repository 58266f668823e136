//! Defines the route handler for the page for entering a new record.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    entry::form::record_form,
    html::{FORM_CONTAINER_STYLE, base, currency_input_styles},
    navigation::NavBar,
    timezone::local_today,
};

fn new_record_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            (record_form(today))
        }
    };

    base("New Transaction", &[currency_input_styles()], &content)
}

/// The state needed for the new record page.
#[derive(Debug, Clone)]
pub struct NewRecordPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewRecordPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for entering a record.
pub async fn get_new_record_page(
    State(state): State<NewRecordPageState>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    Ok(new_record_view(today).into_response())
}
