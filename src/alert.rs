//! Alert fragments for displaying success and error messages to users.
//!
//! Mutating endpoints respond with these fragments so HTMX can swap them
//! into the page's alert container.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

const ALERT_SUCCESS_STYLE: &str = "p-4 mb-4 text-sm rounded border \
    text-green-800 bg-green-50 border-green-300 dark:bg-gray-800 \
    dark:text-green-400 dark:border-green-800";

const ALERT_ERROR_STYLE: &str = "p-4 mb-4 text-sm rounded border \
    text-red-800 bg-red-50 border-red-300 dark:bg-gray-800 \
    dark:text-red-400 dark:border-red-800";

/// An alert message with a severity that controls its styling.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The operation succeeded.
    Success {
        /// Short headline for the alert.
        message: String,
        /// Supporting detail below the headline.
        details: String,
    },
    /// The operation failed.
    Error {
        /// Short headline for the alert.
        message: String,
        /// Supporting detail below the headline.
        details: String,
    },
    /// The operation failed and a headline says it all.
    ErrorSimple {
        /// Short headline for the alert.
        message: String,
    },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (ALERT_SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ALERT_ERROR_STYLE, message, details),
            Alert::ErrorSimple { message } => (ALERT_ERROR_STYLE, message, String::new()),
        };

        html! {
            div class=(style) role="alert"
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }
            }
        }
    }

    /// Render the alert as a full response, choosing the status code from the
    /// alert's severity.
    pub fn into_response(self) -> Response {
        let status_code = match self {
            Alert::Success { .. } => StatusCode::OK,
            Alert::Error { .. } | Alert::ErrorSimple { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, self.into_html()).into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn success_alert_renders_message_and_details() {
        let markup = Alert::Success {
            message: "Import completed successfully!".to_owned(),
            details: "The store now holds 3 records.".to_owned(),
        }
        .into_html();

        let html = Html::parse_fragment(&markup.into_string());
        let alert = html
            .select(&Selector::parse("div[role='alert']").unwrap())
            .next()
            .expect("No alert found");
        let text = alert.text().collect::<String>();

        assert!(text.contains("Import completed successfully!"));
        assert!(text.contains("The store now holds 3 records."));
    }

    #[test]
    fn simple_error_alert_omits_details_paragraph() {
        let markup = Alert::ErrorSimple {
            message: "File type must be JSON.".to_owned(),
        }
        .into_html();

        let html = Html::parse_fragment(&markup.into_string());
        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .collect::<Vec<_>>();

        assert_eq!(
            paragraphs.len(),
            1,
            "want a single paragraph for a simple error, got {}",
            paragraphs.len()
        );
    }
}
