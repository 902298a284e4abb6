use std::collections::HashSet;

use chrono::{Datelike, TimeDelta};

use tickler_test::tickler::expand::Expander;
use tickler_test::tickler::rrule::RecurrenceRule;

use super::helpers::{at, recurring, single};

#[test_log::test]
fn non_recurring_event_appears_iff_anchor_in_window() {
    let events = vec![single("once", at(2024, 5, 10, 12))];
    let expander = Expander::default();

    assert_eq!(expander.expand(&events, at(2024, 5, 1, 0), at(2024, 5, 31, 0)).len(), 1);
    assert_eq!(expander.expand(&events, at(2024, 5, 10, 12), at(2024, 5, 10, 12)).len(), 1);
    assert!(expander.expand(&events, at(2024, 5, 11, 0), at(2024, 5, 31, 0)).is_empty());
}

#[test_log::test]
fn daily_occurrences_are_interval_days_apart() {
    let events = vec![recurring(
        "daily",
        at(2023, 11, 3, 7),
        RecurrenceRule::daily().with_interval(4),
    )];

    let occurrences = Expander::default().expand(&events, at(2024, 1, 1, 0), at(2024, 3, 1, 0));
    assert!(occurrences.len() > 10);
    for pair in occurrences.windows(2) {
        assert_eq!(pair[1].start_at - pair[0].start_at, TimeDelta::days(4));
    }
}

#[test_log::test]
fn weekly_occurrences_use_effective_weekdays_and_never_precede_anchor() {
    let anchor = at(2024, 3, 6, 18);
    let events = vec![recurring(
        "weekly",
        anchor,
        RecurrenceRule::weekly().with_interval(3).with_weekdays([0, 1, 3, 6]),
    )];

    let occurrences = Expander::default().expand(&events, at(2024, 3, 1, 0), at(2024, 8, 1, 0));
    assert!(!occurrences.is_empty());
    for occurrence in &occurrences {
        assert!(occurrence.start_at >= anchor);
        let weekday = occurrence.start_at.weekday().num_days_from_sunday();
        assert!([0, 1, 3, 6].contains(&weekday), "unexpected weekday {weekday}");
    }
    // The anchor's own week only keeps days on or after the anchor (Wed, Sat).
    assert_eq!(occurrences[0].start_at, anchor);
    assert_eq!(occurrences[1].start_at, at(2024, 3, 9, 18));
}

#[test_log::test]
fn monthly_day_31_follows_anchor_day_not_previous_clamp() {
    let events = vec![recurring("monthly", at(2023, 1, 31, 9), RecurrenceRule::monthly())];

    let days: Vec<u32> = Expander::default()
        .expand(&events, at(2023, 1, 1, 0), at(2023, 12, 31, 23))
        .iter()
        .map(|o| o.start_at.day())
        .collect();

    assert_eq!(days, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
}

#[test_log::test]
fn expansion_is_monotone_in_the_window() {
    let events = vec![
        recurring("d", at(2022, 2, 28, 23), RecurrenceRule::daily().with_interval(5)),
        recurring(
            "w",
            at(2023, 7, 4, 6),
            RecurrenceRule::weekly().with_interval(2).with_weekdays([2, 4]),
        ),
        recurring("m", at(2021, 8, 31, 12), RecurrenceRule::monthly().with_interval(5)),
        recurring("y", at(2020, 2, 29, 0), RecurrenceRule::yearly()),
        single("s", at(2024, 4, 15, 9)),
    ];
    let expander = Expander::default();
    let (from, to) = (at(2024, 3, 1, 0), at(2024, 6, 1, 0));
    let inner = expander.expand(&events, from, to);

    for margin_days in [1, 17, 45, 400] {
        let margin = TimeDelta::days(margin_days);
        let outer: HashSet<_> = expander
            .expand(&events, from - margin, to + margin)
            .into_iter()
            .map(|o| (o.event_id, o.start_at))
            .collect();
        for occurrence in &inner {
            assert!(
                outer.contains(&(occurrence.event_id.clone(), occurrence.start_at)),
                "{} at {} missing with margin {margin_days}",
                occurrence.event_id,
                occurrence.start_at
            );
        }
    }
}

#[test_log::test]
fn output_is_sorted_with_id_tiebreak() {
    let events = vec![
        recurring("zeta", at(2024, 1, 1, 9), RecurrenceRule::daily()),
        recurring("alpha", at(2024, 1, 1, 9), RecurrenceRule::daily().with_interval(2)),
    ];

    let occurrences = Expander::default().expand(&events, at(2024, 1, 1, 0), at(2024, 1, 3, 23));
    let keys: Vec<(&str, u32)> = occurrences
        .iter()
        .map(|o| (o.event_id.as_str(), o.start_at.day()))
        .collect();

    assert_eq!(
        keys,
        vec![("alpha", 1), ("zeta", 1), ("zeta", 2), ("alpha", 3), ("zeta", 3)]
    );
}
