use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tickler_core::constants::{DEFAULT_EVENT_TITLE, REMINDER_LEAD_DAYS};
use tickler_core::types::EventId;
use tickler_rrule::instant::{from_epoch_millis, normalize, parse_instant};
use tickler_rrule::{RawRecurrence, RecurrenceRule};

use super::record::EventRecord;

/// Stored definition of a possibly repeating event.
///
/// Serializes in the canonical camelCase shape; deserializes through
/// [`EventRecord`] so legacy and database row shapes are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EventRecord")]
pub struct MasterEvent {
    pub id: EventId,
    pub title: String,
    pub notes: String,
    pub location: String,
    /// Series anchor. Always the first member of the series.
    pub start_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    pub dismissed_occurrences: DismissedOccurrences,
    /// Every occurrence of the series is silenced.
    pub series_dismissed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MasterEvent {
    /// Single-occurrence event with default text fields.
    #[must_use]
    pub fn new(id: EventId, start_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: DEFAULT_EVENT_TITLE.to_string(),
            notes: String::new(),
            location: String::new(),
            start_at: normalize(start_at),
            recurrence: None,
            dismissed_occurrences: DismissedOccurrences::default(),
            series_dismissed: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = normalize_title(Some(title));
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    /// ## Summary
    /// Builds a master event from creation input.
    #[must_use]
    pub fn from_new(id: EventId, input: NewEvent, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: normalize_title(input.title.as_deref()),
            notes: input.notes.unwrap_or_default(),
            location: input.location.unwrap_or_default(),
            start_at: normalize(input.start_at),
            recurrence: input.recurrence.as_ref().and_then(RawRecurrence::normalize),
            dismissed_occurrences: DismissedOccurrences::default(),
            series_dismissed: false,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// ## Summary
    /// Applies the fields present in `patch`. The dismissal set is kept.
    pub fn apply(&mut self, patch: EventPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = normalize_title(Some(&title));
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(start_at) = patch.start_at {
            self.start_at = normalize(start_at);
        }
        if let Some(recurrence) = patch.recurrence {
            self.recurrence = recurrence.as_ref().and_then(RawRecurrence::normalize);
        }
        if let Some(series_dismissed) = patch.series_dismissed {
            self.series_dismissed = series_dismissed;
        }
        self.updated_at = Some(now);
    }

    /// `true` if the occurrence at `start_at` is silenced, individually or
    /// through the series flag.
    #[must_use]
    pub fn is_dismissed(&self, start_at: DateTime<Utc>) -> bool {
        self.series_dismissed || self.dismissed_occurrences.contains(start_at)
    }
}

/// Trims the title; blank or missing titles get the default.
pub(crate) fn normalize_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => DEFAULT_EVENT_TITLE.to_string(),
    }
}

/// Occurrence instants a user has silenced, compared by millisecond instant
/// rather than by how they were written down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct DismissedOccurrences(BTreeSet<DateTime<Utc>>);

impl DismissedOccurrences {
    /// Returns `false` if the instant was already present.
    pub fn insert(&mut self, start_at: DateTime<Utc>) -> bool {
        self.0.insert(normalize(start_at))
    }

    #[must_use]
    pub fn contains(&self, start_at: DateTime<Utc>) -> bool {
        self.0.contains(&normalize(start_at))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateTime<Utc>> {
        self.0.iter()
    }
}

impl FromIterator<DateTime<Utc>> for DismissedOccurrences {
    fn from_iter<T: IntoIterator<Item = DateTime<Utc>>>(iter: T) -> Self {
        Self(iter.into_iter().map(normalize).collect())
    }
}

/// Stored dismissals: an array of timestamp strings or epoch milliseconds,
/// or that array JSON-encoded in a text column. Entries that are neither are
/// dropped on their own so the rest of the event still decodes.
impl From<Value> for DismissedOccurrences {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(entries) => entries.iter().filter_map(dismissal_entry).collect(),
            Value::String(text) if text.trim_start().starts_with('[') => {
                match serde_json::from_str::<Value>(&text) {
                    Ok(decoded @ Value::Array(_)) => Self::from(decoded),
                    _ => {
                        tracing::warn!(column = %text, "Dropping unparseable dismissal column");
                        Self::default()
                    }
                }
            }
            Value::Null => Self::default(),
            other => {
                tracing::warn!(value = %other, "Dropping unexpected dismissal column");
                Self::default()
            }
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "fractional milliseconds truncate toward zero"
)]
fn dismissal_entry(entry: &Value) -> Option<DateTime<Utc>> {
    let parsed = match entry {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis.trunc() as i64))
            .and_then(from_epoch_millis),
        Value::String(text) => parse_instant(text),
        _ => None,
    };
    if parsed.is_none() {
        tracing::warn!(entry = %entry, "Dropping unparseable dismissal entry");
    }
    parsed
}

/// One concrete instance of a master event. Derived on every call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub event_id: EventId,
    pub title: String,
    pub notes: String,
    pub location: String,
    pub start_at: DateTime<Utc>,
    /// Exactly one day before `start_at`.
    pub reminder_at: DateTime<Utc>,
    pub dismissed: bool,
}

impl Occurrence {
    #[must_use]
    pub fn of(event: &MasterEvent, start_at: DateTime<Utc>) -> Self {
        Self {
            event_id: event.id.clone(),
            title: event.title.clone(),
            notes: event.notes.clone(),
            location: event.location.clone(),
            start_at,
            reminder_at: reminder_instant(start_at),
            dismissed: event.is_dismissed(start_at),
        }
    }
}

/// ## Summary
/// Reminder instant for an occurrence: the start minus the reminder lead.
#[must_use]
pub fn reminder_instant(start_at: DateTime<Utc>) -> DateTime<Utc> {
    start_at
        .checked_sub_signed(TimeDelta::days(REMINDER_LEAD_DAYS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Input for creating a master event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub start_at: DateTime<Utc>,
    pub recurrence: Option<RawRecurrence>,
}

/// Partial update. `None` leaves a field unchanged; `recurrence: Some(None)`
/// removes the rule.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub recurrence: Option<Option<RawRecurrence>>,
    pub series_dismissed: Option<bool>,
}
