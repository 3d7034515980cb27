//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use crate::record::RecordStore;

/// The state of the web server.
#[derive(Clone)]
pub struct AppState {
    /// The shared record store, loaded from the persisted document at startup.
    pub record_store: Arc<Mutex<RecordStore>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] from a loaded record store.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland". It is validated per request so that the error can
    /// be shown to the user.
    pub fn new(record_store: RecordStore, local_timezone: &str) -> Self {
        Self {
            record_store: Arc::new(Mutex::new(record_store)),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
