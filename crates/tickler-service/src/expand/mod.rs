//! Occurrence expansion across a collection of master events.

mod dismiss;


use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

use tickler_core::config::Settings;
use tickler_core::constants::REMINDER_LEAD_DAYS;
use tickler_core::error::CoreResult;
use tickler_rrule::{RuleEngine, Window};

use crate::event::{MasterEvent, Occurrence, decode_events};

pub use dismiss::{DismissOutcome, dismiss, dismiss_in, dismiss_series};

/// Knobs for an expansion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Engine carrying the calendar offset used for day/month/year arithmetic.
    pub engine: RuleEngine,
    /// Keep dismissed occurrences in the output, flagged `dismissed = true`.
    pub include_dismissed: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            engine: RuleEngine::utc(),
            include_dismissed: false,
        }
    }
}

impl ExpandOptions {
    /// ## Summary
    /// Builds options from the calendar section of the settings.
    ///
    /// ## Errors
    /// Returns an error if the configured UTC offset is out of range.
    pub fn from_settings(settings: &Settings) -> CoreResult<Self> {
        Ok(Self {
            engine: RuleEngine::new(settings.calendar.offset()?),
            include_dismissed: false,
        })
    }

    #[must_use]
    pub const fn with_dismissed(mut self, include_dismissed: bool) -> Self {
        self.include_dismissed = include_dismissed;
        self
    }
}

/// Turns master events into the ordered occurrence list for a window.
///
/// Stateless apart from its options: expansion only reads events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expander {
    options: ExpandOptions,
}

impl Expander {
    #[must_use]
    pub const fn new(options: ExpandOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> ExpandOptions {
        self.options
    }

    /// ## Summary
    /// Expands every event into its occurrences within `[from, to]`.
    ///
    /// The result is sorted by start instant, ties broken by event id.
    /// Dismissed occurrences are dropped unless the options keep them.
    /// An inverted window yields an empty list.
    #[must_use]
    pub fn expand(
        &self,
        events: &[MasterEvent],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<Occurrence> {
        self.expand_window(events, &Window::new(from, to))
    }

    #[must_use]
    pub fn expand_window(&self, events: &[MasterEvent], window: &Window) -> Vec<Occurrence> {
        if window.is_empty() {
            tracing::debug!(from = %window.from, to = %window.to, "Inverted window, nothing to expand");
            return Vec::new();
        }

        let mut occurrences: Vec<Occurrence> = events
            .iter()
            .flat_map(|event| {
                self.options
                    .engine
                    .candidates(event.recurrence.as_ref(), event.start_at, window)
                    .into_iter()
                    .map(move |start_at| Occurrence::of(event, start_at))
            })
            .filter(|occurrence| self.options.include_dismissed || !occurrence.dismissed)
            .collect();

        occurrences.sort_by(|a, b| {
            a.start_at
                .cmp(&b.start_at)
                .then_with(|| a.event_id.cmp(&b.event_id))
        });

        tracing::trace!(
            events = events.len(),
            occurrences = occurrences.len(),
            "Expanded events"
        );
        occurrences
    }

    /// ## Summary
    /// Decodes stored rows and expands them, skipping rows that cannot be
    /// decoded.
    ///
    /// ## Side Effects
    /// Logs a warning for each skipped row.
    #[must_use]
    pub fn expand_records<I>(&self, rows: I, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Occurrence>
    where
        I: IntoIterator<Item = Value>,
    {
        self.expand(&decode_events(rows), from, to)
    }

    /// ## Summary
    /// Occurrences starting within the next day whose reminder threshold has
    /// passed at `now`.
    #[must_use]
    pub fn active_reminders(&self, events: &[MasterEvent], now: DateTime<Utc>) -> Vec<Occurrence> {
        let mut occurrences = self.starting_within_next_day(events, now);
        occurrences.retain(|occurrence| occurrence.reminder_at <= now);
        occurrences
    }

    #[must_use]
    pub fn starting_within_next_day(
        &self,
        events: &[MasterEvent],
        now: DateTime<Utc>,
    ) -> Vec<Occurrence> {
        self.expand_window(
            events,
            &Window::starting_at(now, TimeDelta::days(REMINDER_LEAD_DAYS)),
        )
    }

    /// Occurrences between `now` and `horizon_days` days later.
    #[must_use]
    pub fn upcoming(
        &self,
        events: &[MasterEvent],
        now: DateTime<Utc>,
        horizon_days: u32,
    ) -> Vec<Occurrence> {
        self.expand_window(
            events,
            &Window::starting_at(now, TimeDelta::days(i64::from(horizon_days))),
        )
    }
}
