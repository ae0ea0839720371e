//! Test doubles shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled so
//! crates under `backend/tests/` can reuse them.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

use crate::domain::ports::{PollEventSink, PollEventSinkError};

/// Sink recording every frame it is handed.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// Create an empty recorder wrapped for registration.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Raw frames in delivery order.
    #[must_use]
    pub fn frames(&self) -> Vec<String> {
        self.lock_frames().clone()
    }

    /// Frames parsed as JSON, in delivery order.
    ///
    /// # Panics
    /// Panics when a recorded frame is not valid JSON.
    #[must_use]
    pub fn events(&self) -> Vec<Value> {
        self.lock_frames()
            .iter()
            .map(|frame| match serde_json::from_str(frame) {
                Ok(value) => value,
                Err(error) => panic!("recorded frame is not JSON: {error}; frame={frame}"),
            })
            .collect()
    }

    /// `type` field of each recorded event.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|event| event.get("type").and_then(Value::as_str))
            .map(str::to_owned)
            .collect()
    }

    fn lock_frames(&self) -> MutexGuard<'_, Vec<String>> {
        match self.frames.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("recording sink mutex"),
        }
    }
}

impl PollEventSink for RecordingSink {
    fn deliver(&self, message: &str) -> Result<(), PollEventSinkError> {
        self.lock_frames().push(message.to_owned());
        Ok(())
    }
}

/// Sink that rejects every frame and counts the attempts.
#[derive(Debug, Default)]
pub struct FailingSink {
    attempts: Mutex<usize>,
}

impl FailingSink {
    /// Create a failing sink wrapped for registration.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// How many deliveries were attempted.
    #[must_use]
    pub fn attempts(&self) -> usize {
        match self.attempts.lock() {
            Ok(guard) => *guard,
            Err(_) => panic!("failing sink mutex"),
        }
    }
}

impl PollEventSink for FailingSink {
    fn deliver(&self, _message: &str) -> Result<(), PollEventSinkError> {
        match self.attempts.lock() {
            Ok(mut guard) => *guard += 1,
            Err(_) => panic!("failing sink mutex"),
        }
        Err(PollEventSinkError::Closed)
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2024-05-01T12:00:00Z, the instant used across the test suite.
    ///
    /// # Panics
    /// Never in practice; the literal timestamp is valid.
    #[must_use]
    pub fn fixture() -> Self {
        match Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single() {
            Some(instant) => Self(instant),
            None => panic!("fixture timestamp must be valid"),
        }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
