//! Tolerant decoding of stored event rows.
//!
//! Rows come from client JSON (camelCase, `startAtISO`) and from SQL tables
//! (snake_case, flat `recurrence_*` columns, `reminder_dismissed` flags).
//! Every shape funnels through [`EventRecord`] into a [`MasterEvent`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use tickler_core::types::EventId;
use tickler_rrule::RawRecurrence;
use tickler_rrule::instant::{from_epoch_millis, normalize, parse_instant};

use super::model::{DismissedOccurrences, MasterEvent, normalize_title};

/// Reasons a stored row cannot become a master event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Event record has no id")]
    MissingId,

    #[error("Event record {0} has no start instant")]
    MissingAnchor(String),

    #[error("Event record {id} has an unparseable start instant: {value}")]
    InvalidAnchor { id: String, value: String },
}

/// Unvalidated event row in any of the accepted storage shapes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(
        default,
        alias = "startAtISO",
        alias = "startAtIso",
        alias = "start_at",
        alias = "start"
    )]
    pub start_at: Option<Value>,
    #[serde(default)]
    pub recurrence: Option<Value>,
    #[serde(default, alias = "recurrence_freq")]
    pub recurrence_freq: Option<String>,
    #[serde(default, alias = "recurrence_interval")]
    pub recurrence_interval: Option<Value>,
    #[serde(default, alias = "recurrence_by_weekday")]
    pub recurrence_by_weekday: Option<Value>,
    #[serde(default, alias = "recurrence_until")]
    pub recurrence_until: Option<String>,
    #[serde(default, alias = "dismissed_occurrences")]
    pub dismissed_occurrences: Option<DismissedOccurrences>,
    #[serde(
        default,
        alias = "reminder_dismissed",
        alias = "seriesDismissed",
        alias = "series_dismissed"
    )]
    pub reminder_dismissed: Option<Value>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<Value>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<Value>,
}

impl EventRecord {
    /// Nested rule object first, then a JSON-encoded rule column, then the
    /// flat `recurrence_*` columns.
    fn raw_recurrence(&self) -> Option<RawRecurrence> {
        match &self.recurrence {
            Some(value @ Value::Object(_)) => {
                match serde_json::from_value::<RawRecurrence>(value.clone()) {
                    Ok(raw) => return Some(raw),
                    Err(err) => tracing::debug!(error = %err, "Ignoring malformed recurrence"),
                }
            }
            Some(Value::String(text)) if !text.trim().is_empty() => {
                match serde_json::from_str::<RawRecurrence>(text) {
                    Ok(raw) => return Some(raw),
                    Err(err) => tracing::debug!(error = %err, "Ignoring malformed recurrence"),
                }
            }
            _ => {}
        }

        self.recurrence_freq.as_ref().map(|freq| RawRecurrence {
            freq: Some(freq.clone()),
            interval: self.recurrence_interval.clone(),
            by_weekday: self.recurrence_by_weekday.clone(),
            until: self.recurrence_until.clone(),
        })
    }
}

impl TryFrom<EventRecord> for MasterEvent {
    type Error = RecordError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .as_ref()
            .and_then(id_text)
            .ok_or(RecordError::MissingId)?;

        let anchor_value = record
            .start_at
            .as_ref()
            .filter(|value| !value.is_null())
            .ok_or_else(|| RecordError::MissingAnchor(id.clone()))?;
        let start_at = instant_value(anchor_value).ok_or_else(|| RecordError::InvalidAnchor {
            id: id.clone(),
            value: anchor_value.to_string(),
        })?;

        let recurrence = record
            .raw_recurrence()
            .as_ref()
            .and_then(RawRecurrence::normalize);

        Ok(Self {
            id: EventId::new(id),
            title: normalize_title(record.title.as_deref()),
            notes: record.notes.unwrap_or_default(),
            location: record.location.unwrap_or_default(),
            start_at: normalize(start_at),
            recurrence,
            dismissed_occurrences: record.dismissed_occurrences.unwrap_or_default(),
            series_dismissed: record.reminder_dismissed.as_ref().is_some_and(flag_value),
            created_at: record.created_at.as_ref().and_then(instant_value),
            updated_at: record.updated_at.as_ref().and_then(instant_value),
        })
    }
}

fn id_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn instant_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_instant(text),
        Value::Number(number) => number.as_i64().and_then(from_epoch_millis),
        _ => None,
    }
}

/// Booleans, `0`/`1` integers and `"true"`/`"1"` strings.
fn flag_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_i64().is_some_and(|n| n != 0),
        Value::String(text) => matches!(text.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    }
}

/// ## Summary
/// Decodes stored rows into master events, skipping rows that cannot be
/// decoded.
///
/// ## Side Effects
/// Logs a warning for each skipped row.
#[must_use]
pub fn decode_events<I>(rows: I) -> Vec<MasterEvent>
where
    I: IntoIterator<Item = Value>,
{
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<MasterEvent>(row) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping malformed event record");
                None
            }
        })
        .collect()
}
