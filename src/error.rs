//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    internal_server_error::{InternalServerErrorPage, render_internal_server_error},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required form field was blank.
    ///
    /// Carries the user-facing name of the field so the validation message
    /// can point at the right input.
    #[error("the {0} cannot be empty")]
    EmptyField(&'static str),

    /// The amount input could not be normalized into a finite number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A negative amount was used to create a record.
    ///
    /// Records store the direction of money flow in their kind, so amounts
    /// are always zero or greater.
    #[error("the amount must be zero or greater")]
    NegativeAmount,

    /// The record kind was not one of "income" or "expense".
    #[error("\"{0}\" is not a valid record kind")]
    InvalidKind(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the record store lock
    #[error("could not acquire the record store lock")]
    StoreLockError,

    /// Reading or writing the persisted record document failed.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("could not access the persisted record document: {0}")]
    StorageError(String),

    /// An error occurred while serializing the record store as JSON
    #[error("could not serialize records as JSON: {0}")]
    JsonSerializationError(String),

    /// The multipart form could not be parsed as an uploaded file.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The multipart form did not contain a JSON file.
    #[error("File is not JSON")]
    NotJson,

    /// The uploaded document was not a JSON array of records.
    #[error("the import document is not a JSON array of records")]
    InvalidImportDocument,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            error @ (Error::EmptyField(_)
            | Error::InvalidAmount(_)
            | Error::NegativeAmount
            | Error::InvalidKind(_)
            | Error::InvalidImportDocument
            | Error::NotJson) => error.into_alert_response(),
            Error::InvalidTimezoneError(timezone) => {
                render_internal_server_error(InternalServerErrorPage {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings \
                        and ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                })
            }
            Error::StoreLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    /// Convert the error into an alert fragment for HTMX form targets.
    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            error @ (Error::EmptyField(_)
            | Error::InvalidAmount(_)
            | Error::NegativeAmount
            | Error::InvalidKind(_)) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid record".to_owned(),
                    details: format!("{error}. Correct the field and try again."),
                }
                .into_html(),
            )
                .into_response(),
            Error::InvalidImportDocument => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not import records".to_owned(),
                    details: "The uploaded file is not a JSON array of records. \
                        Upload a file produced by the export button."
                        .to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            Error::NotJson => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "File type must be JSON.".to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                }
                .into_html(),
            )
                .into_response(),
        }
    }
}
