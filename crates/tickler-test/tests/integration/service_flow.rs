use std::sync::Arc;
use std::thread;

use serde_json::json;

use tickler_test::tickler::config::Settings;
use tickler_test::tickler::event::{EventPatch, NewEvent};
use tickler_test::tickler::expand::DismissOutcome;
use tickler_test::tickler::reminder::ReminderService;
use tickler_test::tickler::rrule::RawRecurrence;
use tickler_test::tickler::store::InMemoryEventStore;
use tickler_test::tickler::types::UserId;

use super::helpers::at;

fn monthly_rent() -> NewEvent {
    NewEvent {
        title: Some(" Rent ".to_string()),
        location: Some("Online".to_string()),
        start_at: at(2024, 1, 31, 9),
        recurrence: Some(RawRecurrence {
            freq: Some("MONTHLY".to_string()),
            interval: Some(json!(1)),
            ..RawRecurrence::default()
        }),
        ..NewEvent::default()
    }
}

#[test_log::test]
fn create_expand_dismiss_round_trip() -> anyhow::Result<()> {
    let settings = Settings::from_toml_str("[reminders]\nhorizon_days = 90\n")?;
    let service = ReminderService::from_settings(Arc::new(InMemoryEventStore::new()), &settings)?;
    let user = UserId::new("alice");

    let rent = service.create_event(&user, monthly_rent())?;
    assert_eq!(rent.title, "Rent");

    let upcoming = service.upcoming(&user, at(2024, 1, 15, 0))?;
    let starts: Vec<_> = upcoming.iter().map(|o| o.start_at).collect();
    assert_eq!(
        starts,
        vec![at(2024, 1, 31, 9), at(2024, 2, 29, 9), at(2024, 3, 31, 9)]
    );

    let now = at(2024, 2, 28, 12);
    let active = service.active_reminders(&user, now)?;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].start_at, at(2024, 2, 29, 9));
    assert_eq!(active[0].reminder_at, at(2024, 2, 28, 9));

    assert_eq!(
        service.dismiss_due_reminder(&user, &rent.id, now)?,
        DismissOutcome::Dismissed
    );
    assert!(service.active_reminders(&user, now)?.is_empty());
    assert_eq!(
        service.dismiss_occurrence(&user, &rent.id, at(2024, 2, 29, 9))?,
        DismissOutcome::AlreadyDismissed
    );

    // Updating other fields keeps previously dismissed instants.
    service.update_event(
        &user,
        &rent.id,
        EventPatch {
            notes: Some("autopay".to_string()),
            ..EventPatch::default()
        },
    )?;
    let march = service.occurrences_in_range(&user, at(2024, 2, 1, 0), at(2024, 3, 31, 23))?;
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].notes, "autopay");
    Ok(())
}

#[test_log::test]
fn store_is_shared_across_threads() -> anyhow::Result<()> {
    let store = Arc::new(InMemoryEventStore::new());
    let service = Arc::new(ReminderService::new(
        Arc::clone(&store),
        tickler_test::tickler::expand::ExpandOptions::default(),
        60,
    ));
    let user = UserId::anonymous();

    let handles: Vec<_> = (0..4)
        .map(|day| {
            let service = Arc::clone(&service);
            let user = user.clone();
            thread::spawn(move || {
                service.create_event(
                    &user,
                    NewEvent {
                        start_at: at(2024, 7, 1 + day, 9),
                        ..NewEvent::default()
                    },
                )
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .map_err(|_panic| anyhow::anyhow!("worker panicked"))??;
    }

    let events = service.events(&user)?;
    assert_eq!(events.len(), 4);
    assert!(events.windows(2).all(|pair| pair[0].start_at <= pair[1].start_at));
    Ok(())
}
