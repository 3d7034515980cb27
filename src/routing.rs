//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    record::{
        clear_records_endpoint, create_record_endpoint, delete_record_endpoint,
        export_records_endpoint, get_import_page, get_records_page, import_records_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::RECORDS_VIEW, get(get_records_page))
        .route(endpoints::IMPORT_VIEW, get(get_import_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::RECORDS_API, post(create_record_endpoint))
        .route(endpoints::CLEAR_RECORDS, post(clear_records_endpoint))
        .route(endpoints::EXPORT, get(export_records_endpoint))
        .route(endpoints::DELETE_RECORD, delete(delete_record_endpoint))
        .route(endpoints::IMPORT, post(import_records_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the records page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::RECORDS_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_records() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::RECORDS_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use scraper::{Html, Selector};

    use crate::{
        AppState, endpoints,
        record::{MemorySlot, RecordStore},
    };

    use super::build_router;

    fn test_server() -> TestServer {
        let state = AppState::new(RecordStore::load(MemorySlot::default()), "Etc/UTC");

        TestServer::new(build_router(state)).unwrap()
    }

    fn record_row_count(page: &str) -> usize {
        Html::parse_document(page)
            .select(&Selector::parse("tbody tr[data-record-row='true']").unwrap())
            .count()
    }

    const SALARY_FORM: [(&str, &str); 7] = [
        ("date", "2024-05-01"),
        ("description", "Salary"),
        ("category", "Work"),
        ("kind", "income"),
        ("amount", "5.000.000"),
        ("month", "0"),
        ("year", ""),
    ];

    #[tokio::test]
    async fn created_record_appears_on_the_records_page_exactly_once() {
        let server = test_server();

        let response = server.post(endpoints::RECORDS_API).form(&SALARY_FORM).await;
        response.assert_status(StatusCode::SEE_OTHER);

        let page = server.get(endpoints::RECORDS_VIEW).await.text();
        assert_eq!(record_row_count(&page), 1);
        assert_eq!(page.matches("Salary").count(), 1);
    }

    #[tokio::test]
    async fn created_record_appears_in_its_month_filter_with_totals() {
        let server = test_server();
        server.post(endpoints::RECORDS_API).form(&SALARY_FORM).await;

        let page = server
            .get(endpoints::RECORDS_VIEW)
            .add_query_param("month", 5)
            .add_query_param("year", 2024)
            .await
            .text();

        assert_eq!(record_row_count(&page), 1);
        assert!(page.contains("$5,000,000.00"));
    }

    #[tokio::test]
    async fn deleting_a_record_twice_leaves_the_store_empty_both_times() {
        let server = test_server();
        server.post(endpoints::RECORDS_API).form(&SALARY_FORM).await;

        let page = server.get(endpoints::RECORDS_VIEW).await.text();
        let html = Html::parse_document(&page);
        let delete_url = html
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .next()
            .and_then(|button| button.value().attr("hx-delete"))
            .expect("No delete button found")
            .to_owned();

        server.delete(&delete_url).await.assert_status_ok();
        server.delete(&delete_url).await.assert_status_ok();

        let page = server.get(endpoints::RECORDS_VIEW).await.text();
        assert_eq!(record_row_count(&page), 0);
    }

    #[tokio::test]
    async fn clearing_the_store_removes_every_record() {
        let server = test_server();
        server.post(endpoints::RECORDS_API).form(&SALARY_FORM).await;

        let response = server.post(endpoints::CLEAR_RECORDS).await;
        response.assert_status(StatusCode::SEE_OTHER);

        let page = server.get(endpoints::RECORDS_VIEW).await.text();
        assert_eq!(record_row_count(&page), 0);
    }

    #[tokio::test]
    async fn exported_store_contains_created_records() {
        let server = test_server();
        server.post(endpoints::RECORDS_API).form(&SALARY_FORM).await;

        let response = server.get(endpoints::EXPORT).await;

        response.assert_status_ok();
        let document = response.text();
        assert!(document.contains("\"desc\":\"Salary\""));
        assert!(document.contains("\"amount\":5000000"));
    }

    #[tokio::test]
    async fn invalid_form_input_is_rejected_with_an_alert() {
        let server = test_server();

        let response = server
            .post(endpoints::RECORDS_API)
            .form(&[
                ("date", "2024-05-01"),
                ("description", "Salary"),
                ("category", "Work"),
                ("kind", "transfer"),
                ("amount", "100"),
            ])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);

        let page = server.get(endpoints::RECORDS_VIEW).await.text();
        assert_eq!(record_row_count(&page), 0);
    }

    #[tokio::test]
    async fn unknown_route_renders_the_404_page() {
        let server = test_server();

        let response = server.get("/definitely/not/a/route").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
