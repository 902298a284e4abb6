//! Candidate generation for a single series.
//!
//! Every frequency seeks straight to the first candidate at or after the
//! window start with closed-form arithmetic, so the cost of a call is bounded
//! by the number of candidates inside the window, not by how long ago the
//! series was anchored.

mod stepped;
mod weekly;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::instant;
use crate::rule::{Frequency, RecurrenceRule};
use crate::window::Window;

use self::stepped::Step;

/// Expands rules on a calendar with a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEngine {
    offset: FixedOffset,
}

impl RuleEngine {
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Engine whose calendar is UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// ## Summary
    /// Returns the instants of the series anchored at `anchor` that fall in
    /// `window`, in ascending order.
    ///
    /// `None` means a single occurrence at the anchor. Candidates past the
    /// rule's `until` bound and candidates before the anchor are never
    /// produced. An inverted window yields nothing.
    #[must_use]
    pub fn candidates(
        &self,
        rule: Option<&RecurrenceRule>,
        anchor: DateTime<Utc>,
        window: &Window,
    ) -> Vec<DateTime<Utc>> {
        if window.is_empty() {
            return Vec::new();
        }

        let anchor = instant::normalize(anchor);
        let candidates = match rule {
            None => single(anchor, window),
            Some(rule) => match rule.frequency() {
                Frequency::Daily => stepped::candidates(Step::Days, self.offset, rule, anchor, window),
                Frequency::Weekly => weekly::candidates(self.offset, rule, anchor, window),
                Frequency::Monthly => {
                    stepped::candidates(Step::Months, self.offset, rule, anchor, window)
                }
                Frequency::Yearly => {
                    stepped::candidates(Step::Years, self.offset, rule, anchor, window)
                }
            },
        };

        tracing::trace!(
            anchor = %anchor,
            rule = ?rule.map(ToString::to_string),
            from = %window.from,
            to = %window.to,
            count = candidates.len(),
            "Generated candidates"
        );
        candidates
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::utc()
    }
}

fn single(anchor: DateTime<Utc>, window: &Window) -> Vec<DateTime<Utc>> {
    if window.contains(anchor) {
        vec![anchor]
    } else {
        Vec::new()
    }
}
