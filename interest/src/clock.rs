use chrono::Utc;

/// Source of "now" for tracker mutations, injectable so tests pin time.
pub trait Clock: Send + Sync {
    /// Current wall-clock time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// System clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
