use chrono::{DateTime, Utc};

use tickler_core::types::EventId;

use crate::event::MasterEvent;

/// Result of a dismissal request. Dismissal is advisory, so an unknown event
/// is an outcome rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    Dismissed,
    AlreadyDismissed,
    EventNotFound,
    NothingDue,
}

impl DismissOutcome {
    /// `true` if the event record changed and needs persisting.
    #[must_use]
    pub const fn changed(self) -> bool {
        matches!(self, Self::Dismissed)
    }
}

/// ## Summary
/// Adds `start_at` to the event's dismissal set.
///
/// ## Side Effects
/// Mutates the in-memory record only; persisting it is up to the caller.
pub fn dismiss(event: &mut MasterEvent, start_at: DateTime<Utc>) -> DismissOutcome {
    if event.dismissed_occurrences.insert(start_at) {
        tracing::debug!(event_id = %event.id, %start_at, "Dismissed occurrence");
        DismissOutcome::Dismissed
    } else {
        DismissOutcome::AlreadyDismissed
    }
}

/// Silences every occurrence of the series.
pub fn dismiss_series(event: &mut MasterEvent) -> DismissOutcome {
    if event.series_dismissed {
        return DismissOutcome::AlreadyDismissed;
    }
    event.series_dismissed = true;
    tracing::debug!(event_id = %event.id, "Dismissed series");
    DismissOutcome::Dismissed
}

/// ## Summary
/// Dismisses an occurrence of the event with id `event_id` in `events`,
/// reporting [`DismissOutcome::EventNotFound`] if no event has that id.
pub fn dismiss_in(
    events: &mut [MasterEvent],
    event_id: &EventId,
    start_at: DateTime<Utc>,
) -> DismissOutcome {
    match events.iter_mut().find(|event| &event.id == event_id) {
        Some(event) => dismiss(event, start_at),
        None => {
            tracing::debug!(%event_id, "Dismissal for unknown event");
            DismissOutcome::EventNotFound
        }
    }
}
