//! The endpoint for creating a record from the new record form.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    record::{
        Record, RecordKind, RecordStore,
        amount::parse_amount_input,
        records_page::{RecordsQuery, empty_string_as_none, records_url},
    },
};

/// The form data for creating a record.
///
/// `amount` and `kind` arrive as raw text so that validation failures can be
/// surfaced as alerts instead of rejections at the extractor layer.
#[derive(Debug, Deserialize)]
pub struct RecordForm {
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction.
    pub description: String,
    /// The category the transaction belongs to.
    pub category: String,
    /// The record kind, "income" or "expense".
    pub kind: String,
    /// The amount as typed, possibly locale-formatted (e.g. "1.234,56").
    pub amount: String,
    /// An optional note, only kept for expenses.
    #[serde(default)]
    pub note: Option<String>,
    /// The month filter active when the form was submitted.
    pub month: Option<u8>,
    /// The year filter active when the form was submitted.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub year: Option<i32>,
}

/// The state needed for creating a record.
#[derive(Clone)]
pub struct CreateRecordState {
    /// The record store to add the record to.
    record_store: Arc<Mutex<RecordStore>>,
}

impl FromRef<AppState> for CreateRecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            record_store: state.record_store.clone(),
        }
    }
}

/// Handle new record form submission, redirecting back to the filtered
/// records view on success.
///
/// Invalid input responds with a user-visible alert and leaves the store
/// unchanged.
pub async fn create_record_endpoint(
    State(state): State<CreateRecordState>,
    Form(form): Form<RecordForm>,
) -> Response {
    let kind = match form.kind.parse::<RecordKind>() {
        Ok(kind) => kind,
        Err(error) => return error.into_alert_response(),
    };

    let amount = match parse_amount_input(&form.amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_alert_response(),
    };

    let draft = Record::build(kind, amount, form.date)
        .description(&form.description)
        .category(&form.category)
        .note(form.note.as_deref());

    let mut store = match state.record_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire record store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.add(draft) {
        Ok(_) => {
            let filter = RecordsQuery {
                month: form.month,
                year: form.year,
            }
            .into_filter();

            (
                HxRedirect(records_url(&filter)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
