//! Clock abstraction for wall-clock formatting
//!
//! Production code uses `SystemClock` which delegates to `chrono::Local::now()`.
//! Tests use `MockClock` to pin the rendered time.

use chrono::{DateTime, Local};

/// Layout of every timestamp the service prints or returns
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trait for getting the current local time
///
/// Injected into the handlers and the heartbeat so tests can control time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Current time rendered as `YYYY-MM-DD HH:MM:SS`
    fn formatted_now(&self) -> String {
        format_time(&self.now())
    }
}

/// Production clock that delegates to `chrono::Local::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Render a local instant as `YYYY-MM-DD HH:MM:SS`
pub fn format_time(instant: &DateTime<Local>) -> String {
    instant.format(TIME_FORMAT).to_string()
}

/// Mock clock for testing with controllable time
#[cfg(test)]
#[allow(clippy::expect_used)]
pub struct MockClock {
    now: std::sync::Mutex<DateTime<Local>>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    /// Clock pinned to 2024-03-15 09:05:07 local time
    pub fn fixed() -> Self {
        use chrono::TimeZone;
        let now = Local
            .with_ymd_and_hms(2024, 3, 15, 9, 5, 7)
            .earliest()
            .expect("valid local time");
        Self::new(now)
    }

    #[allow(dead_code)]
    pub fn advance(&self, duration: chrono::Duration) {
        let mut now = self.now.lock().expect("MockClock lock poisoned");
        *now += duration;
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().expect("MockClock lock poisoned")
    }
}
