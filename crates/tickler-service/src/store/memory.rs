use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tickler_core::types::{EventId, UserId};

use crate::error::{ServiceError, ServiceResult};
use crate::event::MasterEvent;

use super::EventStore;

type Events = HashMap<UserId, Vec<MasterEvent>>;

/// Process-local store keyed by user.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Events>,
}

impl InMemoryEventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Store pre-populated with one user's events.
    #[must_use]
    pub fn with_events(user: UserId, events: Vec<MasterEvent>) -> Self {
        Self {
            events: RwLock::new(HashMap::from([(user, events)])),
        }
    }

    fn read(&self) -> ServiceResult<RwLockReadGuard<'_, Events>> {
        self.events
            .read()
            .map_err(|_poisoned| ServiceError::InvariantViolation("event store lock poisoned"))
    }

    fn write(&self) -> ServiceResult<RwLockWriteGuard<'_, Events>> {
        self.events
            .write()
            .map_err(|_poisoned| ServiceError::InvariantViolation("event store lock poisoned"))
    }
}

impl EventStore for InMemoryEventStore {
    fn list(&self, user: &UserId) -> ServiceResult<Vec<MasterEvent>> {
        Ok(self.read()?.get(user).cloned().unwrap_or_default())
    }

    fn get(&self, user: &UserId, id: &EventId) -> ServiceResult<Option<MasterEvent>> {
        Ok(self
            .read()?
            .get(user)
            .and_then(|events| events.iter().find(|event| &event.id == id))
            .cloned())
    }

    fn insert(&self, user: &UserId, event: MasterEvent) -> ServiceResult<()> {
        let mut guard = self.write()?;
        let events = guard.entry(user.clone()).or_default();
        if events.iter().any(|existing| existing.id == event.id) {
            return Err(ServiceError::Conflict(format!(
                "event {} already exists",
                event.id
            )));
        }
        events.push(event);
        Ok(())
    }

    fn replace(&self, user: &UserId, event: MasterEvent) -> ServiceResult<()> {
        let mut guard = self.write()?;
        let slot = guard
            .get_mut(user)
            .and_then(|events| events.iter_mut().find(|existing| existing.id == event.id))
            .ok_or_else(|| ServiceError::NotFound(format!("event {}", event.id)))?;
        *slot = event;
        Ok(())
    }

    fn update<R, F>(&self, user: &UserId, id: &EventId, change: F) -> ServiceResult<Option<R>>
    where
        F: FnOnce(&mut MasterEvent) -> R,
    {
        let mut guard = self.write()?;
        Ok(guard
            .get_mut(user)
            .and_then(|events| events.iter_mut().find(|event| &event.id == id))
            .map(change))
    }

    fn remove(&self, user: &UserId, id: &EventId) -> ServiceResult<bool> {
        let mut guard = self.write()?;
        let Some(events) = guard.get_mut(user) else {
            return Ok(false);
        };
        let before = events.len();
        events.retain(|event| &event.id != id);
        Ok(events.len() != before)
    }
}
