//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{
    Error,
    store::{RecordStore, SharedStore},
    timezone::get_local_offset,
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store that owns the persisted records.
    pub store: SharedStore,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] that serves records from `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Bangkok".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a canonical timezone name.
    pub fn new(
        store: impl RecordStore + Send + 'static,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            local_timezone: local_timezone.to_owned(),
        })
    }
}
