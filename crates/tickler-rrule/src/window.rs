//! Inclusive time window an expansion is scoped to.

use chrono::{DateTime, TimeDelta, Utc};

/// Closed interval `[from, to]`.
///
/// An inverted window (`from > to`) is legal and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Window {
    #[must_use]
    pub const fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// ## Summary
    /// Window starting at `start` and spanning `length`.
    ///
    /// Saturates at the latest representable instant.
    #[must_use]
    pub fn starting_at(start: DateTime<Utc>, length: TimeDelta) -> Self {
        let to = start
            .checked_add_signed(length)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { from: start, to }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }

    /// ## Summary
    /// Widens the window by `margin` on both sides.
    #[must_use]
    pub fn widened(&self, margin: TimeDelta) -> Self {
        Self {
            from: self
                .from
                .checked_sub_signed(margin)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            to: self
                .to
                .checked_add_signed(margin)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}
