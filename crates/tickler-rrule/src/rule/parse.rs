//! Lenient decoding of stored or user-entered rules.
//!
//! Rules arrive from form input, JSON rows and flat SQL columns, so every field
//! may be missing, stringly typed, or out of range. Normalization never fails:
//! anything that cannot be salvaged degrades to "no recurrence" or to the
//! field's default.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RuleError;
use crate::instant::parse_instant;
use crate::rule::{Frequency, RecurrenceRule};

/// Unvalidated rule as it appears in storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecurrence {
    #[serde(default, alias = "frequency")]
    pub freq: Option<String>,
    #[serde(default)]
    pub interval: Option<Value>,
    #[serde(default, alias = "by_weekday")]
    pub by_weekday: Option<Value>,
    #[serde(default, alias = "untilISO", alias = "until_iso")]
    pub until: Option<String>,
}

impl RawRecurrence {
    /// ## Summary
    /// Normalizes the raw fields into a rule.
    ///
    /// Returns `None` when the series does not recur: frequency missing,
    /// `NONE`, or unrecognized.
    #[must_use]
    pub fn normalize(&self) -> Option<RecurrenceRule> {
        let freq = self.freq.as_deref()?.trim();
        let frequency = match freq.parse::<Frequency>() {
            Ok(frequency) => frequency,
            Err(err) => {
                if !freq.is_empty() && !freq.eq_ignore_ascii_case("NONE") {
                    tracing::debug!(error = %err, "Treating rule as non-recurring");
                }
                return None;
            }
        };

        let mut rule = RecurrenceRule::new(frequency)
            .with_interval(self.interval.as_ref().map_or(1, parse_interval));

        if let Some(weekdays) = &self.by_weekday {
            rule = rule.with_weekdays(parse_weekdays(weekdays));
        }

        if let Some(until_text) = self.until.as_deref() {
            match parse_instant(until_text) {
                Some(until) => rule = rule.with_until(until),
                None => tracing::debug!(until = %until_text, "Ignoring unparseable until bound"),
            }
        }

        tracing::trace!(rule = %rule, "Normalized recurrence rule");
        Some(rule)
    }
}

impl From<&RecurrenceRule> for RawRecurrence {
    fn from(rule: &RecurrenceRule) -> Self {
        Self {
            freq: Some(rule.frequency().to_string()),
            interval: Some(Value::from(rule.interval())),
            by_weekday: (!rule.by_weekday().is_empty())
                .then(|| Value::from(rule.by_weekday().iter().copied().collect::<Vec<_>>())),
            until: rule.until().map(|until| until.to_rfc3339()),
        }
    }
}

impl TryFrom<RawRecurrence> for RecurrenceRule {
    type Error = RuleError;

    fn try_from(raw: RawRecurrence) -> Result<Self, Self::Error> {
        raw.normalize().ok_or(RuleError::NoRecurrence)
    }
}

/// Number or numeric string; anything else means 1. Clamped into `1..=u32::MAX`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "fractional intervals truncate toward zero"
)]
fn parse_interval(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.map_or(1, |interval| {
        u32::try_from(interval.max(1)).unwrap_or(u32::MAX)
    })
}

/// Array of numbers or numeric strings, a JSON-encoded array (database
/// column form), or a comma-separated list. Out-of-range entries are dropped.
fn parse_weekdays(value: &Value) -> BTreeSet<u8> {
    match value {
        Value::Array(items) => items.iter().filter_map(parse_weekday).collect(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.starts_with('[') {
                serde_json::from_str::<Value>(trimmed)
                    .ok()
                    .filter(Value::is_array)
                    .map(|decoded| parse_weekdays(&decoded))
                    .unwrap_or_default()
            } else {
                trimmed
                    .split(',')
                    .filter_map(|part| part.trim().parse::<u8>().ok())
                    .filter(|day| *day <= 6)
                    .collect()
            }
        }
        Value::Number(_) => parse_weekday(value).into_iter().collect(),
        _ => BTreeSet::new(),
    }
}

fn parse_weekday(value: &Value) -> Option<u8> {
    let day = match value {
        Value::Number(number) => number.as_u64()?,
        Value::String(text) => text.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u8::try_from(day).ok().filter(|day| *day <= 6)
}
