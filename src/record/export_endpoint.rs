//! The endpoint for downloading the full store as a JSON file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, record::RecordStore};

/// The file name suggested to the browser for the exported document.
const EXPORT_FILE_NAME: &str = "spendbook_records.json";

/// The state needed to export the record store.
#[derive(Clone)]
pub struct ExportRecordsState {
    /// The record store to export.
    record_store: Arc<Mutex<RecordStore>>,
}

impl FromRef<AppState> for ExportRecordsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            record_store: state.record_store.clone(),
        }
    }
}

/// A route handler that serves the full serialized store as a JSON file
/// download. No filtering is applied.
pub async fn export_records_endpoint(
    State(state): State<ExportRecordsState>,
) -> Result<Response, Error> {
    let store = state
        .record_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire record store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let document = store
        .export_document()
        .inspect_err(|error| tracing::error!("could not export records: {error}"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        document,
    )
        .into_response())
}

// ============================================================================
// TESTS
// ============================================================================
