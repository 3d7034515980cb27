//! The 500 page shown when something goes wrong server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::html::{PAGE_CONTAINER_STYLE, base};

/// Describes what went wrong and what the user can do about it.
pub struct InternalServerErrorPage<'a> {
    /// A short description of the error.
    pub description: &'a str,
    /// A suggestion for how the user can fix the error.
    pub fix: &'a str,
}

impl Default for InternalServerErrorPage<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

fn internal_server_error_view(page: InternalServerErrorPage) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-4xl font-bold mb-4" { "500" }
            p class="font-medium mb-2" { (page.description) }
            p { (page.fix) }
        }
    };

    base("Internal Server Error", &[], &content)
}

/// Render the internal server error page with the status code 500.
pub fn render_internal_server_error(page: InternalServerErrorPage) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        internal_server_error_view(page),
    )
        .into_response()
}

/// A route handler that renders the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(Default::default())
}
