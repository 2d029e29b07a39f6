use thiserror::Error;

use crate::query::filter::NameFilter;
use crate::storage::{State, Storage};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("state store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Answers the `states` query field against an injected store handle.
///
/// Holds no state of its own beyond the handle; every call is an independent
/// read and failures are surfaced to the caller rather than retried.
#[derive(Clone)]
pub struct StatesResolver<S> {
    storage: S,
}

impl<S: Storage> StatesResolver<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Resolve the state list for the given filter text. An absent filter
    /// argument selects everything, same as an empty one.
    pub fn states(&self, filter: Option<&str>) -> Result<Vec<State>, QueryError> {
        let filter = filter.unwrap_or("");
        let predicate = NameFilter::from_text(filter);
        self.storage.find_states(&predicate).map_err(|err| {
            log::error!("State lookup failed for filter {:?}: {:#}", filter, err);
            QueryError::StoreUnavailable(format!("{err:#}"))
        })
    }
}
