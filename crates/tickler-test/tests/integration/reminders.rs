use tickler_test::tickler::expand::{DismissOutcome, Expander, dismiss, dismiss_in};
use tickler_test::tickler::types::EventId;

use super::helpers::{at, single};

/// ## Summary
/// A dismissed anchor disappears from both the window expansion and the
/// active reminders.
#[test_log::test]
fn dismissed_anchor_is_hidden_everywhere() {
    let mut event = single("dentist", at(2024, 5, 2, 9));
    let expander = Expander::default();
    let now = at(2024, 5, 1, 10);

    assert_eq!(expander.active_reminders(std::slice::from_ref(&event), now).len(), 1);

    assert_eq!(dismiss(&mut event, at(2024, 5, 2, 9)), DismissOutcome::Dismissed);
    let events = [event];
    assert!(expander.expand(&events, at(2024, 5, 1, 0), at(2024, 5, 3, 0)).is_empty());
    assert!(expander.active_reminders(&events, now).is_empty());
}

#[test_log::test]
fn active_reminders_cover_only_the_next_day() {
    let now = at(2024, 5, 1, 10);
    let events = vec![
        single("started", at(2024, 5, 1, 9)),
        single("tomorrow-morning", at(2024, 5, 2, 8)),
        single("day-after", at(2024, 5, 3, 8)),
    ];

    let active = Expander::default().active_reminders(&events, now);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].event_id.as_str(), "tomorrow-morning");
    assert_eq!(active[0].reminder_at, at(2024, 5, 1, 8));
}

#[test]
fn dismissing_twice_equals_dismissing_once() {
    let mut events = vec![single("e1", at(2024, 1, 1, 9))];
    let id = EventId::new("e1");

    dismiss_in(&mut events, &id, at(2024, 1, 1, 9));
    let once = events[0].dismissed_occurrences.clone();
    assert_eq!(
        dismiss_in(&mut events, &id, at(2024, 1, 1, 9)),
        DismissOutcome::AlreadyDismissed
    );
    assert_eq!(events[0].dismissed_occurrences, once);

    assert_eq!(
        dismiss_in(&mut events, &EventId::new("ghost"), at(2024, 1, 1, 9)),
        DismissOutcome::EventNotFound
    );
}
