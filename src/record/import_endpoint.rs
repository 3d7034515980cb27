//! The endpoint for importing records from an uploaded JSON document.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    alert::Alert,
    record::{RecordStore, import::parse_import_document},
};

/// The state needed for importing records.
#[derive(Clone)]
pub struct ImportRecordsState {
    /// The record store the imported records replace.
    pub record_store: Arc<Mutex<RecordStore>>,
}

impl FromRef<AppState> for ImportRecordsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            record_store: state.record_store.clone(),
        }
    }
}

/// Route handler for importing records from an uploaded JSON file.
///
/// The uploaded document destructively replaces the whole store. A malformed
/// document is rejected with an alert and the store is left unchanged.
pub async fn import_records_endpoint(
    State(state): State<ImportRecordsState>,
    mut multipart: Multipart,
) -> Result<Response, Response> {
    let mut document = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()).into_alert_response())?
    {
        document = Some(parse_multipart_field(field).await.map_err(|error| {
            tracing::debug!("Failed to read multipart field: {error}");
            error.into_alert_response()
        })?);
    }

    let Some(document) = document else {
        return Err((
            StatusCode::BAD_REQUEST,
            Alert::ErrorSimple {
                message: "Choose a file to upload.".to_owned(),
            }
            .into_html(),
        )
            .into_response());
    };

    let records = parse_import_document(&document)
        .inspect_err(|error| tracing::debug!("Failed to parse import document: {error}"))
        .map_err(|error| error.into_alert_response())?;

    let mut store = state.record_store.lock().map_err(|error| {
        tracing::error!("could not acquire record store lock: {error}");
        Error::StoreLockError.into_alert_response()
    })?;

    let count = store
        .replace_all(records)
        .inspect_err(|error| tracing::error!("Failed to import records: {error}"))
        .map_err(|_| {
            Alert::Error {
                message: "Import failed".to_owned(),
                details: "An unexpected error occurred, please try again later".to_owned(),
            }
            .into_response()
        })?;

    tracing::info!("Import completed: the store now holds {count} records");

    let alert = Alert::Success {
        message: "Import completed successfully!".to_owned(),
        details: format!("The store now holds {count} records."),
    };
    Ok((StatusCode::CREATED, alert.into_html()).into_response())
}

async fn parse_multipart_field(field: Field<'_>) -> Result<String, Error> {
    if field.content_type() != Some("application/json") {
        return Err(Error::NotJson);
    }

    field
        .text()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
