//! Defines the route handler for the page that lists, filters and summarizes records.

use std::{
    fmt,
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    record::{
        RecordStore,
        filter::{RecordFilter, filter_records, summarize, year_range},
        view::{RecordTableRow, records_view},
    },
    timezone::get_local_offset,
};

/// The month/year filter query parameters of the records page.
///
/// Missing parameters fall back to the view that shows everything, so the
/// bare records URL always works.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RecordsQuery {
    /// The calendar month to match, 0-12. Zero or absent matches every month.
    pub(crate) month: Option<u8>,
    /// The calendar year to match. Absent or blank matches every year.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) year: Option<i32>,
}

impl RecordsQuery {
    /// Normalize the query into a [RecordFilter], applying defaults.
    ///
    /// Month values outside 1-12 (only reachable by hand-editing the URL)
    /// select every month rather than erroring.
    pub(crate) fn into_filter(self) -> RecordFilter {
        let month = match self.month {
            Some(month @ 1..=12) => month,
            _ => 0,
        };

        RecordFilter {
            month,
            year: self.year,
        }
    }
}

/// The records page URL with `filter` encoded as query parameters.
///
/// Used by mutation endpoints to redirect back to the view the user was
/// looking at.
pub(crate) fn records_url(filter: &RecordFilter) -> String {
    let year = filter.year.map(|year| year.to_string()).unwrap_or_default();

    serde_urlencoded::to_string([("month", filter.month.to_string()), ("year", year)])
        .inspect_err(|error| {
            tracing::error!("Could not encode records page query parameters: {error}");
        })
        .map(|query| format!("{}?{query}", endpoints::RECORDS_VIEW))
        .unwrap_or_else(|_| endpoints::RECORDS_VIEW.to_owned())
}

/// Deserialize an optional query parameter, treating the empty string as
/// `None`. HTML selects submit their "all" choice as an empty value.
pub(crate) fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;

    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// The state needed for the records page.
#[derive(Clone)]
pub struct RecordsViewState {
    /// The record store to display.
    record_store: Arc<Mutex<RecordStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl FromRef<AppState> for RecordsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            record_store: state.record_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render an overview of the user's records: summary totals, the filter
/// controls, the new record form and the record table.
pub async fn get_records_page(
    State(state): State<RecordsViewState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let filter = query.into_filter();

    let store = state
        .record_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire record store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let matching = filter_records(store.records(), &filter);
    let totals = summarize(&matching);
    let years = year_range(store.records(), today.year());

    let rows = matching
        .into_iter()
        .map(RecordTableRow::new_from_record)
        .collect();

    Ok(records_view(rows, totals, &filter, &years, today).into_response())
}

pub(crate) fn current_local_date(local_timezone: &str) -> Result<Date, Error> {
    let Some(local_offset) = get_local_offset(local_timezone) else {
        tracing::error!("Invalid timezone {}", local_timezone);
        return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use scraper::{ElementRef, Html, Selector};
    use time::macros::date;

    use crate::{
        record::{
            MemorySlot, Record, RecordKind, RecordStore,
            filter::RecordFilter,
        },
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{RecordsQuery, RecordsViewState, get_records_page, records_url};

    fn store_with_example_records() -> RecordStore {
        let mut store = RecordStore::load(MemorySlot::default());
        store
            .add(
                Record::build(RecordKind::Income, 5_000_000.0, date!(2024 - 05 - 01))
                    .description("Salary")
                    .category("Work"),
            )
            .unwrap();
        store
            .add(
                Record::build(RecordKind::Expense, 1_500_000.0, date!(2023 - 05 - 10))
                    .description("Rent")
                    .category("Housing"),
            )
            .unwrap();

        store
    }

    fn view_state(store: RecordStore) -> RecordsViewState {
        RecordsViewState {
            record_store: Arc::new(Mutex::new(store)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn records_page_shows_all_records_date_descending_by_default() {
        let state = view_state(store_with_example_records());

        let response = get_records_page(
            State(state),
            Query(RecordsQuery {
                month: None,
                year: None,
            }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let rows = record_rows(&html);
        assert_eq!(rows.len(), 2, "want 2 record rows, got {}", rows.len());
        assert!(row_text(&rows[0]).contains("Salary"));
        assert!(row_text(&rows[1]).contains("Rent"));
    }

    #[tokio::test]
    async fn records_page_filters_by_month_and_year_and_sums_totals() {
        let state = view_state(store_with_example_records());

        let response = get_records_page(
            State(state),
            Query(RecordsQuery {
                month: Some(5),
                year: Some(2024),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let rows = record_rows(&html);
        assert_eq!(rows.len(), 1, "want 1 record row, got {}", rows.len());
        assert!(row_text(&rows[0]).contains("Salary"));

        assert_eq!(summary_text(&html, "income"), "$5,000,000.00");
        assert_eq!(summary_text(&html, "expenses"), "$0.00");
        assert_eq!(summary_text(&html, "balance"), "$5,000,000.00");
    }

    #[tokio::test]
    async fn records_page_shows_empty_state_when_nothing_matches() {
        let state = view_state(store_with_example_records());

        let response = get_records_page(
            State(state),
            Query(RecordsQuery {
                month: Some(12),
                year: Some(1999),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        assert!(record_rows(&html).is_empty());
        html.select(&Selector::parse("td[data-empty-state='true']").unwrap())
            .next()
            .expect("No empty-state cell found");
    }

    #[tokio::test]
    async fn records_page_marks_selected_filter_options() {
        let state = view_state(store_with_example_records());

        let response = get_records_page(
            State(state),
            Query(RecordsQuery {
                month: Some(5),
                year: Some(2024),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;

        let selected_month = selected_option_value(&html, "select[name='month']");
        let selected_year = selected_option_value(&html, "select[name='year']");
        assert_eq!(selected_month.as_deref(), Some("5"));
        assert_eq!(selected_year.as_deref(), Some("2024"));
    }

    #[test]
    fn out_of_range_month_falls_back_to_all_months() {
        let filter = RecordsQuery {
            month: Some(13),
            year: None,
        }
        .into_filter();

        assert_eq!(filter, RecordFilter::ALL);
    }

    #[test]
    fn records_url_encodes_the_filter() {
        let url = records_url(&RecordFilter {
            month: 5,
            year: Some(2024),
        });

        assert_eq!(url, "/records?month=5&year=2024");
    }

    #[test]
    fn records_url_leaves_year_blank_when_unset() {
        let url = records_url(&RecordFilter::ALL);

        assert_eq!(url, "/records?month=0&year=");
    }

    fn record_rows(html: &Html) -> Vec<ElementRef<'_>> {
        html.select(&Selector::parse("tbody tr[data-record-row='true']").unwrap())
            .collect()
    }

    fn row_text(row: &ElementRef) -> String {
        row.text().collect::<String>()
    }

    #[track_caller]
    fn summary_text(html: &Html, summary: &str) -> String {
        let selector = Selector::parse(&format!("[data-summary='{summary}']")).unwrap();

        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("No summary element found for {summary}"))
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    fn selected_option_value(html: &Html, select: &str) -> Option<String> {
        let selector = Selector::parse(&format!("{select} option[selected]")).unwrap();

        html.select(&selector)
            .next()
            .and_then(|option| option.value().attr("value"))
            .map(ToOwned::to_owned)
    }
}
