//! Alerts shown to the user when a form submission fails.
//!
//! Form endpoints answer with an alert fragment which htmx swaps into the
//! `#alert-container` element of the page.

use maud::{Markup, html};

/// An alert message with a short summary and a longer explanation.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let Alert::Error { message, details } = self;

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div
                id="alert"
                role="alert"
                class="flex items-start p-4 mb-4 text-sm text-red-800 border
                    border-red-300 rounded-lg bg-red-50 dark:bg-gray-800
                    dark:text-red-400 dark:border-red-800 shadow-lg"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty()
                    {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    class="ms-3 -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex
                        items-center justify-center h-8 w-8 hover:bg-red-200
                        dark:hover:bg-gray-700"
                    aria-label="Close"
                    onclick="this.closest('#alert').remove()"
                {
                    "✕"
                }
            }
        }
    }
}
