//! Scene transition log.
//!
//! The director records every transition it performs, in order, with the
//! frame it happened on. Useful for diagnostics and for asserting on a
//! run's path in tests.

use crate::core::scene::SceneId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single scene transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<I: SceneId> {
    /// The scene being deactivated.
    pub from: I,
    /// The scene being activated.
    pub to: I,
    /// The frame on which the transition happened.
    pub frame: u64,
    /// When the transition occurred.
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of scene transitions.
///
/// The log is immutable: [`TransitionLog::record`] returns a new log with
/// the record appended, leaving the original untouched.
///
/// # Example
///
/// ```rust
/// use stagehand::core::{TransitionLog, TransitionRecord};
/// use stagehand::scene_ids;
/// use chrono::Utc;
///
/// scene_ids! {
///     enum Mode {
///         Menu,
///         Game,
///     }
/// }
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord {
///     from: Mode::Menu,
///     to: Mode::Game,
///     frame: 12,
///     timestamp: Utc::now(),
/// });
///
/// let path = log.path();
/// assert_eq!(path, vec![&Mode::Menu, &Mode::Game]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionLog<I: SceneId> {
    records: Vec<TransitionRecord<I>>,
}

impl<I: SceneId> Default for TransitionLog<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: SceneId> TransitionLog<I> {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new log.
    pub fn record(&self, record: TransitionRecord<I>) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Get all records in order.
    pub fn records(&self) -> &[TransitionRecord<I>] {
        &self.records
    }

    /// Get the path of scenes traversed: the first record's `from`, then
    /// the `to` of each record. Empty when nothing transitioned.
    pub fn path(&self) -> Vec<&I> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Wall-clock span from the first to the last transition.
    ///
    /// Returns `None` when the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::scene_ids! {
        enum TestMode {
            Menu,
            Game,
            Pause,
        }
    }

    fn record(from: TestMode, to: TestMode, frame: u64) -> TransitionRecord<TestMode> {
        TransitionRecord {
            from,
            to,
            frame,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log: TransitionLog<TestMode> = TransitionLog::new();
        assert!(log.is_empty());
        assert!(log.path().is_empty());
        assert!(log.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let log = TransitionLog::new();
        let new_log = log.record(record(TestMode::Menu, TestMode::Game, 1));

        assert_eq!(log.len(), 0);
        assert_eq!(new_log.len(), 1);
    }

    #[test]
    fn path_follows_recorded_order() {
        let log = TransitionLog::new()
            .record(record(TestMode::Menu, TestMode::Game, 1))
            .record(record(TestMode::Game, TestMode::Pause, 7))
            .record(record(TestMode::Pause, TestMode::Game, 9));

        let path = log.path();
        assert_eq!(
            path,
            vec![
                &TestMode::Menu,
                &TestMode::Game,
                &TestMode::Pause,
                &TestMode::Game
            ]
        );
    }

    #[test]
    fn frames_are_preserved() {
        let log = TransitionLog::new().record(record(TestMode::Menu, TestMode::Game, 42));
        assert_eq!(log.records()[0].frame, 42);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let log = TransitionLog::new()
            .record(record(TestMode::Menu, TestMode::Game, 1))
            .record(record(TestMode::Game, TestMode::Menu, 2));

        assert!(log.duration().is_some());
    }

    #[test]
    fn log_serializes_correctly() {
        let log = TransitionLog::new().record(record(TestMode::Menu, TestMode::Game, 3));

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: TransitionLog<TestMode> = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.len(), log.len());
    }
}
