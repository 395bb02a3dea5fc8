//! Alert fragments for displaying success and error messages to users.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert message rendered into the page's alert container.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message.
    Success { message: String },
    /// An error message with extra detail text.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as an HTML fragment targeting the alert container.
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message } => (SUCCESS_ALERT_STYLE, message, String::new()),
            Alert::Error { message, details } => (ERROR_ALERT_STYLE, message, details),
        };

        html! {
            div id="alert-container" hx-swap-oob="true" class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role="alert"
                {
                    span class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p class="text-sm" { (details) }
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

const SUCCESS_ALERT_STYLE: &str = "p-4 text-green-800 bg-green-50 rounded border \
    border-green-300 dark:bg-gray-800 dark:text-green-400 dark:border-green-800";

const ERROR_ALERT_STYLE: &str = "p-4 text-red-800 bg-red-50 rounded border \
    border-red-300 dark:bg-gray-800 dark:text-red-400 dark:border-red-800";
