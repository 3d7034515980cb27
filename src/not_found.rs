//! The 404 page shown for unknown routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
};

fn not_found_view() -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-4xl font-bold mb-4" { "404" }
            p class="mb-4" { "The page you were looking for does not exist." }
            a href=(endpoints::RECORDS_VIEW) class=(LINK_STYLE) { "Back to your records" }
        }
    };

    base("Page Not Found", &[], &content)
}

/// A route handler that renders the 404 page for unknown routes.
pub async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, not_found_view()).into_response()
}

#[cfg(test)]
mod not_found_tests {
    use axum::http::StatusCode;

    use crate::test_utils::{assert_valid_html, parse_html_document};

    use super::get_404_not_found;

    #[tokio::test]
    async fn renders_not_found_page() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }
}
