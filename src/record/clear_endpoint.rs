//! The endpoint for clearing the whole record store.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, Error, endpoints, record::RecordStore};

/// The state needed to clear the record store.
#[derive(Clone)]
pub struct ClearRecordsState {
    /// The record store to clear.
    record_store: Arc<Mutex<RecordStore>>,
}

impl FromRef<AppState> for ClearRecordsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            record_store: state.record_store.clone(),
        }
    }
}

/// A route handler that empties the record store and redirects to the
/// records view so the page refreshes.
pub async fn clear_records_endpoint(State(state): State<ClearRecordsState>) -> Response {
    let mut store = match state.record_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire record store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.clear() {
        Ok(()) => (
            HxRedirect(endpoints::RECORDS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not clear the record store: {error}");
            error.into_alert_response()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        endpoints,
        record::{MemorySlot, Record, RecordKind, RecordStore},
        test_utils::assert_hx_redirect,
    };

    use super::{ClearRecordsState, clear_records_endpoint};

    #[tokio::test]
    async fn clear_empties_the_store_and_redirects() {
        let mut store = RecordStore::load(MemorySlot::default());
        store
            .add(
                Record::build(RecordKind::Expense, 10.0, date!(2024 - 05 - 01))
                    .description("Lunch")
                    .category("Food"),
            )
            .unwrap();
        let state = ClearRecordsState {
            record_store: Arc::new(Mutex::new(store)),
        };
        let record_store = state.record_store.clone();

        let response = clear_records_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::RECORDS_VIEW);
        assert!(record_store.lock().unwrap().records().is_empty());
    }
}
