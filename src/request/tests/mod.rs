//! Unit tests for the request module.


use chrono::{DateTime, Local, TimeZone, Utc};

mockall::mock! {
    pub Clock {}

    impl mockable::Clock for Clock {
        fn local(&self) -> DateTime<Local>;
        fn utc(&self) -> DateTime<Utc>;
    }
}

/// Builds a clock pinned to `now`.
pub(super) fn clock_at(now: DateTime<Utc>) -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(move || now);
    clock
        .expect_local()
        .returning(move || now.with_timezone(&Local));
    clock
}

/// Midday on 2024-03-10, UTC.
pub(super) fn midday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}
