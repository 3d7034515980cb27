//! The endpoint for deleting a single record.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error,
    record::{RecordId, RecordStore},
};

/// The state needed to delete a record.
#[derive(Clone)]
pub struct DeleteRecordState {
    /// The record store to delete the record from.
    record_store: Arc<Mutex<RecordStore>>,
}

impl FromRef<AppState> for DeleteRecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            record_store: state.record_store.clone(),
        }
    }
}

/// A route handler for deleting a record, responds with an empty fragment
/// that HTMX swaps in place of the deleted table row.
///
/// Deleting an unknown ID is a no-op: the row is gone either way, so the
/// response is the same 200.
pub async fn delete_record_endpoint(
    State(state): State<DeleteRecordState>,
    Path(record_id): Path<String>,
) -> Response {
    let mut store = match state.record_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire record store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.delete(&RecordId::from(record_id)) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(_) => (StatusCode::OK, Html("")).into_response(),
        Err(error) => {
            tracing::error!("Could not delete record: {error}");
            error.into_alert_response()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
