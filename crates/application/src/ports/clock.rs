//! Clock port for time-related operations

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Asset timestamps and server-suggested retry delays are both computed
/// against this clock, so tests can pin it.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time as milliseconds since the Unix epoch.
    fn epoch_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}
