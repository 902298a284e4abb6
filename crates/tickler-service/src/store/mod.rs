//! Persistence collaborator for master events.
//!
//! Expansion never touches storage; callers fetch events through an
//! [`EventStore`], expand them, and write back any dismissal change.

mod memory;

use std::sync::Arc;

use tickler_core::types::{EventId, UserId};

use crate::error::ServiceResult;
use crate::event::MasterEvent;

pub use memory::InMemoryEventStore;

/// Per-user storage of master events.
pub trait EventStore: Send + Sync {
    /// ## Summary
    /// All of the user's events, in storage order.
    ///
    /// ## Errors
    /// Returns an error if the backing store is unavailable.
    fn list(&self, user: &UserId) -> ServiceResult<Vec<MasterEvent>>;

    /// ## Errors
    /// Returns an error if the backing store is unavailable.
    fn get(&self, user: &UserId, id: &EventId) -> ServiceResult<Option<MasterEvent>>;

    /// ## Summary
    /// Stores a new event.
    ///
    /// ## Errors
    /// Returns `Conflict` if the user already has an event with the same id.
    fn insert(&self, user: &UserId, event: MasterEvent) -> ServiceResult<()>;

    /// ## Summary
    /// Overwrites the stored event with the same id.
    ///
    /// ## Errors
    /// Returns `NotFound` if the user has no event with that id.
    fn replace(&self, user: &UserId, event: MasterEvent) -> ServiceResult<()>;

    /// ## Summary
    /// Applies `change` to the stored event in place, atomically with respect
    /// to every other store operation. Returns `None` if the user has no
    /// event with that id.
    ///
    /// ## Errors
    /// Returns an error if the backing store is unavailable.
    fn update<R, F>(&self, user: &UserId, id: &EventId, change: F) -> ServiceResult<Option<R>>
    where
        F: FnOnce(&mut MasterEvent) -> R;

    /// Returns `true` if an event was removed.
    ///
    /// ## Errors
    /// Returns an error if the backing store is unavailable.
    fn remove(&self, user: &UserId, id: &EventId) -> ServiceResult<bool>;
}

impl<S: EventStore> EventStore for Arc<S> {
    fn list(&self, user: &UserId) -> ServiceResult<Vec<MasterEvent>> {
        (**self).list(user)
    }

    fn get(&self, user: &UserId, id: &EventId) -> ServiceResult<Option<MasterEvent>> {
        (**self).get(user, id)
    }

    fn insert(&self, user: &UserId, event: MasterEvent) -> ServiceResult<()> {
        (**self).insert(user, event)
    }

    fn replace(&self, user: &UserId, event: MasterEvent) -> ServiceResult<()> {
        (**self).replace(user, event)
    }

    fn update<R, F>(&self, user: &UserId, id: &EventId, change: F) -> ServiceResult<Option<R>>
    where
        F: FnOnce(&mut MasterEvent) -> R,
    {
        (**self).update(user, id, change)
    }

    fn remove(&self, user: &UserId, id: &EventId) -> ServiceResult<bool> {
        (**self).remove(user, id)
    }
}
