use jiff::Timestamp;

pub mod coded;
pub mod mood;
pub mod task;

/// Current time truncated to whole seconds, the resolution records are persisted at.
pub fn now() -> Timestamp {
    Timestamp::from_second(Timestamp::now().as_second()).unwrap_or(Timestamp::UNIX_EPOCH)
}
