//! Registration store.
//!
//! The store is synchronous and in-memory. The flow controller only appends
//! to it; updates and removals belong to the admin side of the portal.

use rf_protocol::registration_models::{Registration, RegistrationPatch};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Registration not found: {0}")]
    NotFound(Uuid),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Holds registration records.
pub trait DataStore: Send + Sync {
    fn append(&self, record: Registration);

    fn update(&self, id: Uuid, patch: RegistrationPatch) -> StoreResult<()>;

    fn remove(&self, id: Uuid) -> StoreResult<Registration>;

    /// Records matching `filter`, in insertion order.
    fn list(&self, filter: &dyn Fn(&Registration) -> bool) -> Vec<Registration>;

    fn list_for_event(&self, event_id: &str) -> Vec<Registration> {
        self.list(&|record| record.event_id == event_id)
    }

    fn get(&self, id: Uuid) -> Option<Registration> {
        self.list(&|record| record.id == id).into_iter().next()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<Registration>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DataStore for InMemoryStore {
    fn append(&self, record: Registration) {
        tracing::debug!(registration_id = %record.id, event_id = %record.event_id, "registration stored");
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    fn update(&self, id: Uuid, patch: RegistrationPatch) -> StoreResult<()> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patch.apply(record);
        Ok(())
    }

    fn remove(&self, id: Uuid) -> StoreResult<Registration> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let position = records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(records.remove(position))
    }

    fn list(&self, filter: &dyn Fn(&Registration) -> bool) -> Vec<Registration> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|record| filter(record))
            .cloned()
            .collect()
    }
}
