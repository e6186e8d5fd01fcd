// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of the current instant for modification stamps, event times and
/// in-process lease expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
