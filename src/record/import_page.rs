use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_TEXT_INPUT_STYLE, base},
    navigation::NavBar,
};

fn import_form_view() -> Markup {
    let import_route = endpoints::IMPORT;

    html! {
        form
            hx-post=(import_route)
            enctype="multipart/form-data"
            hx-disabled-elt="#file, #submit-button"
            hx-swap="none"
            hx-target-error="#alert-container"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="file"
                    class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Choose a file to upload"
                }

                input
                    id="file"
                    type="file"
                    name="file"
                    accept="application/json"
                    placeholder="file"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p
                {
                    "Upload a JSON file created by the export button. \
                    The uploaded records replace everything currently in the store."
                }
            }

            button
                type="submit"
                id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Upload File"
            }
        }
    }
}

fn import_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::IMPORT_VIEW).into_html();
    let form = import_form_view();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="relative"
            {
                (form)
            }
        }
    };

    base("Import Records", &[], &content)
}

/// Route handler for the import page.
pub async fn get_import_page() -> Response {
    import_view().into_response()
}

#[cfg(test)]
mod import_page_tests {
    use axum::http::StatusCode;
    use scraper::ElementRef;

    use crate::{
        endpoints,
        test_utils::{
            assert_content_type, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    use super::get_import_page;

    #[tokio::test]
    async fn render_page() {
        let response = get_import_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::IMPORT, "hx-post");
        assert_form_enctype(&form, "multipart/form-data");
        assert_file_input(&form);
        assert_form_submit_button(&form);
    }

    #[track_caller]
    fn assert_form_enctype(form: &ElementRef, enctype: &str) {
        let form_enctype = form
            .value()
            .attr("enctype")
            .expect("enctype attribute missing");

        assert_eq!(
            form_enctype, enctype,
            "want form with attribute enctype=\"{enctype}\", got {form_enctype:?}"
        );
    }

    #[track_caller]
    fn assert_file_input(form: &ElementRef) {
        for input in form.select(&scraper::Selector::parse("input").unwrap()) {
            if input.value().attr("name").unwrap_or_default() == "file" {
                let input_type = input.value().attr("type").unwrap_or_default();
                let input_accept = input.value().attr("accept").unwrap_or_default();

                assert_eq!(
                    input_type, "file",
                    "want input with type \"file\", got {input_type:?}"
                );
                assert_eq!(
                    input_accept, "application/json",
                    "want input accepting \"application/json\", got {input_accept:?}"
                );
                assert!(
                    input.value().attr("required").is_some(),
                    "want the file input to have the required attribute but got none"
                );

                return;
            }
        }

        panic!("No input found with name \"file\"");
    }
}
