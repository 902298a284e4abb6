use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};
use crate::rule::RawRecurrence;

/// Repetition unit of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = RuleError;

    /// Case-insensitive. `NONE` is not a frequency and is rejected like any
    /// other unknown value.
    fn from_str(value: &str) -> RuleResult<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            _ => Err(RuleError::UnknownFrequency(value.to_string())),
        }
    }
}

/// ## Summary
/// Sunday-based weekday index (`Sunday = 0` .. `Saturday = 6`).
#[must_use]
pub fn weekday_index(weekday: Weekday) -> u8 {
    // num_days_from_sunday is always 0..=6
    u8::try_from(weekday.num_days_from_sunday()).unwrap_or_default()
}

/// A validated repetition rule.
///
/// Construction keeps the invariants: `interval >= 1`, weekday indices in
/// `0..=6`, and weekday selection only on weekly rules. Deserialization goes
/// through [`RawRecurrence`] so stored rules get the same normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRecurrence")]
pub struct RecurrenceRule {
    #[serde(rename = "freq")]
    frequency: Frequency,
    interval: u32,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    by_weekday: BTreeSet<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    until: Option<DateTime<Utc>>,
}

impl RecurrenceRule {
    /// Rule repeating every single `frequency` unit, unbounded.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            by_weekday: BTreeSet::new(),
            until: None,
        }
    }

    #[must_use]
    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    #[must_use]
    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    #[must_use]
    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    #[must_use]
    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Values below 1 are clamped up to 1.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// ## Summary
    /// Restricts a weekly rule to the given weekday indices.
    ///
    /// Indices outside `0..=6` are dropped; duplicates collapse. Ignored for
    /// non-weekly rules.
    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        if self.frequency == Frequency::Weekly {
            self.by_weekday = weekdays.into_iter().filter(|day| *day <= 6).collect();
        }
        self
    }

    #[must_use]
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(crate::instant::normalize(until));
        self
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Explicit weekday selection; empty means "the anchor's weekday".
    #[must_use]
    pub const fn by_weekday(&self) -> &BTreeSet<u8> {
        &self.by_weekday
    }

    #[must_use]
    pub const fn until(&self) -> Option<DateTime<Utc>> {
        self.until
    }

    /// ## Summary
    /// Weekdays a weekly series actually lands on for the given anchor weekday.
    #[must_use]
    pub fn effective_weekdays(&self, anchor_weekday: Weekday) -> BTreeSet<u8> {
        if self.by_weekday.is_empty() {
            BTreeSet::from([weekday_index(anchor_weekday)])
        } else {
            self.by_weekday.clone()
        }
    }

    /// `true` if `instant` is not past the inclusive `until` bound.
    #[must_use]
    pub fn allows(&self, instant: DateTime<Utc>) -> bool {
        self.until.is_none_or(|until| instant <= until)
    }
}

impl std::fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FREQ={};INTERVAL={}", self.frequency, self.interval)?;
        if !self.by_weekday.is_empty() {
            let days: Vec<String> = self.by_weekday.iter().map(u8::to_string).collect();
            write!(f, ";BYWEEKDAY={}", days.join(","))?;
        }
        if let Some(until) = self.until {
            write!(f, ";UNTIL={}", until.to_rfc3339())?;
        }
        Ok(())
    }
}
