//! Reminder service: event CRUD plus expansion and dismissal over an
//! injected [`EventStore`].


use chrono::{DateTime, Utc};

use tickler_core::config::Settings;
use tickler_core::types::{EventId, UserId};

use crate::error::ServiceResult;
use crate::event::{EventPatch, MasterEvent, NewEvent, Occurrence};
use crate::expand::{self, DismissOutcome, ExpandOptions, Expander};
use crate::store::EventStore;

/// Application-facing entry point over a store.
#[derive(Debug)]
pub struct ReminderService<S: EventStore> {
    store: S,
    expander: Expander,
    horizon_days: u32,
}

impl<S: EventStore> ReminderService<S> {
    #[must_use]
    pub const fn new(store: S, options: ExpandOptions, horizon_days: u32) -> Self {
        Self {
            store,
            expander: Expander::new(options),
            horizon_days,
        }
    }

    /// ## Summary
    /// Builds a service using the calendar offset and reminder horizon from
    /// `settings`.
    ///
    /// ## Errors
    /// Returns an error if the configured UTC offset is out of range.
    pub fn from_settings(store: S, settings: &Settings) -> ServiceResult<Self> {
        Ok(Self::new(
            store,
            ExpandOptions::from_settings(settings)?,
            settings.reminders.horizon_days,
        ))
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// ## Summary
    /// Creates a master event with a fresh id.
    ///
    /// ## Errors
    /// Returns an error if the store rejects the insert.
    #[tracing::instrument(skip(self, user, input), fields(user = %user))]
    pub fn create_event(&self, user: &UserId, input: NewEvent) -> ServiceResult<MasterEvent> {
        let event = MasterEvent::from_new(EventId::generate(), input, Utc::now());
        self.store.insert(user, event.clone())?;
        tracing::debug!(event_id = %event.id, "Created event");
        Ok(event)
    }

    /// ## Summary
    /// Applies a partial update. Returns `None` if the event does not exist.
    ///
    /// ## Errors
    /// Returns an error if the store fails.
    #[tracing::instrument(skip(self, user, id, patch), fields(user = %user, event_id = %id))]
    pub fn update_event(
        &self,
        user: &UserId,
        id: &EventId,
        patch: EventPatch,
    ) -> ServiceResult<Option<MasterEvent>> {
        let now = Utc::now();
        self.store.update(user, id, |event| {
            event.apply(patch, now);
            event.clone()
        })
    }

    /// ## Errors
    /// Returns an error if the store fails.
    #[tracing::instrument(skip(self, user, id), fields(user = %user, event_id = %id))]
    pub fn delete_event(&self, user: &UserId, id: &EventId) -> ServiceResult<bool> {
        self.store.remove(user, id)
    }

    /// ## Summary
    /// The user's master events ordered by anchor, ties broken by id.
    ///
    /// ## Errors
    /// Returns an error if the store fails.
    pub fn events(&self, user: &UserId) -> ServiceResult<Vec<MasterEvent>> {
        let mut events = self.store.list(user)?;
        events.sort_by(|a, b| a.start_at.cmp(&b.start_at).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    /// ## Errors
    /// Returns an error if the store fails.
    #[tracing::instrument(skip(self, user), fields(user = %user))]
    pub fn occurrences_in_range(
        &self,
        user: &UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ServiceResult<Vec<Occurrence>> {
        Ok(self.expander.expand(&self.store.list(user)?, from, to))
    }

    /// ## Errors
    /// Returns an error if the store fails.
    #[tracing::instrument(skip(self, user), fields(user = %user))]
    pub fn active_reminders(
        &self,
        user: &UserId,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<Occurrence>> {
        Ok(self.expander.active_reminders(&self.store.list(user)?, now))
    }

    /// ## Errors
    /// Returns an error if the store fails.
    pub fn starting_within_next_day(
        &self,
        user: &UserId,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<Occurrence>> {
        Ok(self
            .expander
            .starting_within_next_day(&self.store.list(user)?, now))
    }

    /// ## Summary
    /// Occurrences from `now` through the configured horizon.
    ///
    /// ## Errors
    /// Returns an error if the store fails.
    pub fn upcoming(&self, user: &UserId, now: DateTime<Utc>) -> ServiceResult<Vec<Occurrence>> {
        Ok(self
            .expander
            .upcoming(&self.store.list(user)?, now, self.horizon_days))
    }

    /// ## Summary
    /// Dismisses a single occurrence of an event.
    ///
    /// ## Errors
    /// Returns an error if the store fails. An unknown event is reported as
    /// [`DismissOutcome::EventNotFound`].
    ///
    /// ## Side Effects
    /// Mutates the stored event under the store's lock; `updated_at` moves
    /// only when the dismissal set changed.
    #[tracing::instrument(skip(self, user, id), fields(user = %user, event_id = %id))]
    pub fn dismiss_occurrence(
        &self,
        user: &UserId,
        id: &EventId,
        start_at: DateTime<Utc>,
    ) -> ServiceResult<DismissOutcome> {
        self.modify(user, id, |event| expand::dismiss(event, start_at))
    }

    /// ## Summary
    /// Dismisses the event's earliest reminder active at `now`.
    ///
    /// ## Errors
    /// Returns an error if the store fails.
    #[tracing::instrument(skip(self, user, id), fields(user = %user, event_id = %id))]
    pub fn dismiss_due_reminder(
        &self,
        user: &UserId,
        id: &EventId,
        now: DateTime<Utc>,
    ) -> ServiceResult<DismissOutcome> {
        let expander = self.expander;
        self.modify(user, id, |event| {
            match expander
                .active_reminders(std::slice::from_ref(event), now)
                .first()
            {
                Some(occurrence) => expand::dismiss(event, occurrence.start_at),
                None => DismissOutcome::NothingDue,
            }
        })
    }

    /// ## Errors
    /// Returns an error if the store fails.
    #[tracing::instrument(skip(self, user, id), fields(user = %user, event_id = %id))]
    pub fn dismiss_series(&self, user: &UserId, id: &EventId) -> ServiceResult<DismissOutcome> {
        self.modify(user, id, expand::dismiss_series)
    }

    fn modify<F>(&self, user: &UserId, id: &EventId, change: F) -> ServiceResult<DismissOutcome>
    where
        F: FnOnce(&mut MasterEvent) -> DismissOutcome,
    {
        let now = Utc::now();
        let outcome = self.store.update(user, id, |event| {
            let outcome = change(event);
            if outcome.changed() {
                event.updated_at = Some(now);
            }
            outcome
        })?;

        Ok(outcome.unwrap_or_else(|| {
            tracing::debug!("Dismissal for unknown event");
            DismissOutcome::EventNotFound
        }))
    }
}
