//! Store-backed market hours and the open/closed predicate.

use time::OffsetDateTime;

use crate::store::KeyValueStore;
use crate::{CoreError, HolidayDate, MarketHours, TimeOfDay};

/// Storage key holding the schedule document.
pub const MARKET_KEY: &str = "market";

/// Open/close/holiday configuration persisted under [`MARKET_KEY`].
#[derive(Clone)]
pub struct MarketSchedule {
    store: KeyValueStore,
}

impl MarketSchedule {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Persist the default session when no schedule document exists yet.
    pub fn seed(&self) -> Result<(), CoreError> {
        if self.store.get::<Option<MarketHours>>(MARKET_KEY, None).is_none() {
            self.store.set(MARKET_KEY, &MarketHours::default())?;
        }
        Ok(())
    }

    /// Current schedule, falling back to the default session when the stored
    /// document is absent or unreadable.
    pub fn hours(&self) -> MarketHours {
        self.store.get(MARKET_KEY, MarketHours::default())
    }

    /// Unconditionally overwrite the schedule. Holidays are taken as given;
    /// splitting a comma-joined input is the caller's job.
    pub fn set_hours(
        &self,
        open: TimeOfDay,
        close: TimeOfDay,
        holidays: Vec<HolidayDate>,
    ) -> Result<MarketHours, CoreError> {
        let hours = MarketHours::new(open, close, holidays)?;
        self.store.set(MARKET_KEY, &hours)?;
        Ok(hours)
    }

    /// Whether the market is open at the given instant.
    pub fn is_open_at(&self, at: OffsetDateTime) -> bool {
        self.hours().is_open_at(at)
    }

    /// Whether the market is open right now, on the local clock. Falls back
    /// to UTC when the local offset cannot be determined.
    pub fn is_open_now(&self) -> bool {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.is_open_at(now)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::ValidationError;

    fn schedule() -> MarketSchedule {
        MarketSchedule::new(KeyValueStore::in_memory())
    }

    #[test]
    fn defaults_when_nothing_stored() {
        let schedule = schedule();
        let hours = schedule.hours();
        assert_eq!(hours, MarketHours::default());
    }

    #[test]
    fn set_hours_round_trips_exactly() {
        let schedule = schedule();
        let open = TimeOfDay::new(9, 0).expect("valid");
        let close = TimeOfDay::new(17, 0).expect("valid");
        let holidays = vec![HolidayDate::parse("2024-01-01").expect("valid date")];

        schedule
            .set_hours(open, close, holidays.clone())
            .expect("set should succeed");

        let stored = schedule.hours();
        assert_eq!(stored.open, open);
        assert_eq!(stored.close, close);
        assert_eq!(stored.holidays, holidays);
    }

    #[test]
    fn set_hours_rejects_open_after_close() {
        let schedule = schedule();
        let open = TimeOfDay::new(17, 0).expect("valid");
        let close = TimeOfDay::new(9, 0).expect("valid");

        let err = schedule
            .set_hours(open, close, Vec::new())
            .expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OpenNotBeforeClose { .. })
        ));
    }

    #[test]
    fn closed_on_weekend_and_holiday() {
        let schedule = schedule();
        schedule
            .set_hours(
                TimeOfDay::new(9, 30).expect("valid"),
                TimeOfDay::new(16, 0).expect("valid"),
                vec![HolidayDate::parse("2024-12-25").expect("valid date")],
            )
            .expect("set should succeed");

        // Saturday and Sunday, mid-session time.
        assert!(!schedule.is_open_at(datetime!(2024-03-02 12:00:00 UTC)));
        assert!(!schedule.is_open_at(datetime!(2024-03-03 12:00:00 UTC)));
        // Christmas 2024 falls on a Wednesday.
        assert!(!schedule.is_open_at(datetime!(2024-12-25 12:00:00 UTC)));
        // Ordinary Thursday inside the session.
        assert!(schedule.is_open_at(datetime!(2024-12-26 12:00:00 UTC)));
    }

    #[test]
    fn seed_leaves_existing_schedule_alone() {
        let schedule = schedule();
        let open = TimeOfDay::new(8, 0).expect("valid");
        let close = TimeOfDay::new(12, 0).expect("valid");
        schedule
            .set_hours(open, close, Vec::new())
            .expect("set should succeed");

        schedule.seed().expect("seed should succeed");
        assert_eq!(schedule.hours().open, open);
    }
}
