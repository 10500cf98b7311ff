//! Behavior-driven tests for the market schedule.

use tickdeck_core::{
    HolidayDate, KeyValueStore, MarketHours, MarketSchedule, StorageBackend, TimeOfDay, MARKET_KEY,
};
use time::macros::datetime;

fn schedule() -> MarketSchedule {
    MarketSchedule::new(KeyValueStore::in_memory())
}

fn time_of_day(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).expect("valid time of day")
}

#[test]
fn when_nothing_is_stored_the_default_session_applies() {
    let schedule = schedule();
    let hours = schedule.hours();

    assert_eq!(hours.open.to_string(), "09:30");
    assert_eq!(hours.close.to_string(), "16:00");
    assert!(hours.holidays.is_empty());
}

#[test]
fn set_hours_round_trips_exactly() {
    // Given: A custom session with one holiday
    let schedule = schedule();
    let holidays = vec![HolidayDate::parse("2024-01-01").expect("valid date")];

    // When: The schedule is overwritten and read back
    schedule
        .set_hours(time_of_day(9, 0), time_of_day(17, 0), holidays.clone())
        .expect("set should succeed");
    let stored = schedule.hours();

    // Then: Exactly the written values come back
    assert_eq!(stored.open.to_string(), "09:00");
    assert_eq!(stored.close.to_string(), "17:00");
    assert_eq!(stored.holidays, holidays);
}

#[test]
fn weekends_are_closed_regardless_of_time_of_day() {
    let schedule = schedule();

    // 2024-03-02 is a Saturday, 2024-03-03 a Sunday.
    for hour in [0, 9, 12, 15, 23] {
        let saturday = datetime!(2024-03-02 00:00:00 UTC).replace_hour(hour).expect("valid hour");
        let sunday = datetime!(2024-03-03 00:00:00 UTC).replace_hour(hour).expect("valid hour");
        assert!(!schedule.is_open_at(saturday), "Saturday {hour}:00");
        assert!(!schedule.is_open_at(sunday), "Sunday {hour}:00");
    }
}

#[test]
fn holidays_are_closed_and_plain_weekdays_inside_the_session_are_open() {
    // Given: Independence Day 2024 (a Thursday) is configured as a holiday
    let schedule = schedule();
    schedule
        .set_hours(
            time_of_day(9, 30),
            time_of_day(16, 0),
            vec![HolidayDate::parse("2024-07-04").expect("valid date")],
        )
        .expect("set should succeed");

    // Then: The holiday is closed even mid-session
    assert!(!schedule.is_open_at(datetime!(2024-07-04 12:00:00 UTC)));
    // And: The following Friday at the same time is open
    assert!(schedule.is_open_at(datetime!(2024-07-05 12:00:00 UTC)));
}

#[test]
fn session_bounds_are_inclusive_on_both_ends() {
    let schedule = schedule();

    // 2024-03-05 is a Tuesday.
    assert!(schedule.is_open_at(datetime!(2024-03-05 09:30:00 UTC)));
    assert!(schedule.is_open_at(datetime!(2024-03-05 16:00:59 UTC)));
    assert!(!schedule.is_open_at(datetime!(2024-03-05 09:29:59 UTC)));
    assert!(!schedule.is_open_at(datetime!(2024-03-05 16:01:00 UTC)));
}

#[test]
fn corrupt_schedule_document_falls_back_to_the_default_session() {
    // Given: Garbage stored under the market key
    let backend = std::sync::Arc::new(tickdeck_core::MemoryBackend::new());
    backend
        .write(MARKET_KEY, r#"{"open": "25:99"}"#)
        .expect("raw write should succeed");

    // When: The schedule is read
    let schedule = MarketSchedule::new(KeyValueStore::new(backend));

    // Then: The default session applies instead of an error
    assert_eq!(schedule.hours(), MarketHours::default());
}
