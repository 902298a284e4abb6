use chrono::{DateTime, FixedOffset, Utc};
use tickler_rrule::{RawRecurrence, RuleEngine, Window};

pub struct RecurrenceCase {
    pub name: &'static str,
    pub anchor: &'static str,
    /// Stored rule JSON; `None` for a single-occurrence event.
    pub rule: Option<&'static str>,
    pub utc_offset_minutes: i32,
    pub from: &'static str,
    pub to: &'static str,
    pub expected: &'static [&'static str],
}

#[expect(clippy::too_many_lines)]
pub fn recurrence_cases() -> Vec<RecurrenceCase> {
    vec![
        RecurrenceCase {
            name: "monthly_month_end_clamps_in_leap_year",
            anchor: "2024-01-31T09:00:00Z",
            rule: Some(r#"{"freq":"MONTHLY","interval":1}"#),
            utc_offset_minutes: 0,
            from: "2024-01-01T00:00:00Z",
            to: "2024-04-30T23:59:59Z",
            expected: &[
                "2024-01-31T09:00:00Z",
                "2024-02-29T09:00:00Z",
                "2024-03-31T09:00:00Z",
                "2024-04-30T09:00:00Z",
            ],
        },
        RecurrenceCase {
            name: "weekly_monday_friday",
            anchor: "2024-03-04T10:00:00Z",
            rule: Some(r#"{"freq":"WEEKLY","interval":1,"byWeekday":[1,5]}"#),
            utc_offset_minutes: 0,
            from: "2024-03-04T00:00:00Z",
            to: "2024-03-17T23:59:59Z",
            expected: &[
                "2024-03-04T10:00:00Z",
                "2024-03-08T10:00:00Z",
                "2024-03-11T10:00:00Z",
                "2024-03-15T10:00:00Z",
            ],
        },
        RecurrenceCase {
            name: "daily_string_interval_seeks_to_grid",
            anchor: "2024-01-01T08:00:00Z",
            rule: Some(r#"{"freq":"daily","interval":"3"}"#),
            utc_offset_minutes: 0,
            from: "2024-01-05T00:00:00Z",
            to: "2024-01-15T23:59:59Z",
            expected: &[
                "2024-01-07T08:00:00Z",
                "2024-01-10T08:00:00Z",
                "2024-01-13T08:00:00Z",
            ],
        },
        RecurrenceCase {
            name: "yearly_leap_day_clamps_to_feb_28",
            anchor: "2024-02-29T12:00:00Z",
            rule: Some(r#"{"freq":"YEARLY"}"#),
            utc_offset_minutes: 0,
            from: "2024-01-01T00:00:00Z",
            to: "2028-12-31T00:00:00Z",
            expected: &[
                "2024-02-29T12:00:00Z",
                "2025-02-28T12:00:00Z",
                "2026-02-28T12:00:00Z",
                "2027-02-28T12:00:00Z",
                "2028-02-29T12:00:00Z",
            ],
        },
        RecurrenceCase {
            name: "none_frequency_is_single",
            anchor: "2024-06-01T00:00:00Z",
            rule: Some(r#"{"freq":"NONE","interval":4}"#),
            utc_offset_minutes: 0,
            from: "2024-05-01T00:00:00Z",
            to: "2024-07-01T00:00:00Z",
            expected: &["2024-06-01T00:00:00Z"],
        },
        RecurrenceCase {
            name: "unknown_frequency_is_single",
            anchor: "2024-06-01T00:00:00Z",
            rule: Some(r#"{"freq":"HOURLY"}"#),
            utc_offset_minutes: 0,
            from: "2024-05-01T00:00:00Z",
            to: "2024-07-01T00:00:00Z",
            expected: &["2024-06-01T00:00:00Z"],
        },
        RecurrenceCase {
            name: "single_outside_window",
            anchor: "2024-06-01T00:00:00Z",
            rule: None,
            utc_offset_minutes: 0,
            from: "2024-06-02T00:00:00Z",
            to: "2024-07-01T00:00:00Z",
            expected: &[],
        },
        RecurrenceCase {
            name: "daily_until_is_inclusive",
            anchor: "2024-01-01T09:00:00Z",
            rule: Some(r#"{"freq":"DAILY","untilISO":"2024-01-03T09:00:00.000Z"}"#),
            utc_offset_minutes: 0,
            from: "2024-01-01T00:00:00Z",
            to: "2024-01-31T00:00:00Z",
            expected: &[
                "2024-01-01T09:00:00Z",
                "2024-01-02T09:00:00Z",
                "2024-01-03T09:00:00Z",
            ],
        },
        RecurrenceCase {
            name: "weekly_biweekly_from_sql_weekday_column",
            anchor: "2024-01-02T07:30:00Z",
            rule: Some(r#"{"freq":"WEEKLY","interval":2,"by_weekday":"[2,4]"}"#),
            utc_offset_minutes: 0,
            from: "2024-01-01T00:00:00Z",
            to: "2024-01-31T23:59:59Z",
            expected: &[
                "2024-01-02T07:30:00Z",
                "2024-01-04T07:30:00Z",
                "2024-01-16T07:30:00Z",
                "2024-01-18T07:30:00Z",
                "2024-01-30T07:30:00Z",
            ],
        },
        RecurrenceCase {
            name: "weekly_weekday_in_local_calendar",
            anchor: "2024-03-04T03:00:00Z",
            rule: Some(r#"{"freq":"WEEKLY","byWeekday":[0]}"#),
            utc_offset_minutes: -300,
            from: "2024-03-01T00:00:00Z",
            to: "2024-03-15T00:00:00Z",
            expected: &["2024-03-04T03:00:00Z", "2024-03-11T03:00:00Z"],
        },
        RecurrenceCase {
            name: "monthly_month_end_in_local_calendar",
            anchor: "2024-01-30T23:00:00Z",
            rule: Some(r#"{"freq":"MONTHLY"}"#),
            utc_offset_minutes: 120,
            from: "2024-01-01T00:00:00Z",
            to: "2024-04-30T00:00:00Z",
            expected: &[
                "2024-01-30T23:00:00Z",
                "2024-02-28T23:00:00Z",
                "2024-03-30T23:00:00Z",
                "2024-04-29T23:00:00Z",
            ],
        },
        RecurrenceCase {
            name: "daily_weekly_step_from_distant_anchor",
            anchor: "1990-01-01T06:00:00Z",
            rule: Some(r#"{"freq":"DAILY","interval":7}"#),
            utc_offset_minutes: 0,
            from: "2030-01-01T00:00:00Z",
            to: "2030-01-20T00:00:00Z",
            expected: &["2030-01-07T06:00:00Z", "2030-01-14T06:00:00Z"],
        },
        RecurrenceCase {
            name: "window_before_anchor_is_empty",
            anchor: "2024-06-01T00:00:00Z",
            rule: Some(r#"{"freq":"DAILY"}"#),
            utc_offset_minutes: 0,
            from: "2024-01-01T00:00:00Z",
            to: "2024-05-31T23:59:59Z",
            expected: &[],
        },
    ]
}

pub fn assert_case(case: &RecurrenceCase) {
    let rule = case.rule.and_then(|json| {
        serde_json::from_str::<RawRecurrence>(json)
            .unwrap_or_else(|err| panic!("Case {} has invalid rule JSON: {err}", case.name))
            .normalize()
    });
    let offset = FixedOffset::east_opt(case.utc_offset_minutes * 60)
        .unwrap_or_else(|| panic!("Case {} has invalid offset", case.name));
    let window = Window::new(parse_rfc3339(case.from), parse_rfc3339(case.to));

    let actual = RuleEngine::new(offset).candidates(rule.as_ref(), parse_rfc3339(case.anchor), &window);
    let expected: Vec<DateTime<Utc>> = case.expected.iter().map(|value| parse_rfc3339(value)).collect();

    assert_eq!(actual, expected, "Case {} did not match", case.name);
}

fn parse_rfc3339(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap_or_else(|err| panic!("Failed to parse rfc3339 value {value}: {err}"))
        .with_timezone(&Utc)
}
