use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::change_engine::models::Mode;

/// Correct answers per practice mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectCounts {
    pub calculate: u64,
    pub count: u64,
}

impl CorrectCounts {
    pub fn get(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Calculate => self.calculate,
            Mode::Count     => self.count,
        }
    }

    fn bump(&mut self, mode: Mode) {
        match mode {
            Mode::Calculate => self.calculate += 1,
            Mode::Count     => self.count += 1,
        }
    }
}

/// Cumulative progress for one student.
///
/// Only the two answer transitions mutate it. `best_streak >= current_streak`
/// holds after every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    total_xp: u64,
    current_streak: u32,
    best_streak: u32,
    problems_solved: u64,
    correct_by_mode: CorrectCounts,
}

impl SessionState {
    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn problems_solved(&self) -> u64 {
        self.problems_solved
    }

    pub fn correct_by_mode(&self) -> CorrectCounts {
        self.correct_by_mode
    }

    /// Commit a correct answer worth `xp`.
    pub fn record_correct(&mut self, mode: Mode, xp: u32) {
        self.total_xp = self.total_xp.saturating_add(u64::from(xp));
        self.current_streak = self.current_streak.saturating_add(1);
        self.best_streak = self.best_streak.max(self.current_streak);
        self.problems_solved += 1;
        self.correct_by_mode.bump(mode);
    }

    /// A wrong answer breaks the streak; everything else stays.
    pub fn record_incorrect(&mut self) {
        self.current_streak = 0;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            total_xp: clamp_i64(self.total_xp),
            current_streak: i64::from(self.current_streak),
            best_streak: i64::from(self.best_streak),
            problems_solved: clamp_i64(self.problems_solved),
            calculate_correct: clamp_i64(self.correct_by_mode.calculate),
            count_correct: clamp_i64(self.correct_by_mode.count),
        }
    }

    /// Restore from a stored snapshot, repairing anything a corrupt or
    /// tampered record got wrong: negative counters become zero and the best
    /// streak is raised to the current streak.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let state = SessionState {
            total_xp: non_negative(snapshot.total_xp),
            current_streak: streak(snapshot.current_streak),
            best_streak: streak(snapshot.best_streak),
            problems_solved: non_negative(snapshot.problems_solved),
            correct_by_mode: CorrectCounts {
                calculate: non_negative(snapshot.calculate_correct),
                count: non_negative(snapshot.count_correct),
            },
        };
        let repaired = SessionState { best_streak: state.best_streak.max(state.current_streak), ..state };
        if repaired.snapshot() != *snapshot {
            warn!(?snapshot, "repaired inconsistent progress record");
        }
        repaired
    }
}

fn clamp_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

fn non_negative(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

fn streak(v: i64) -> u32 {
    if v <= 0 {
        0
    } else {
        u32::try_from(v).unwrap_or(u32::MAX)
    }
}

/// Wire form of [`SessionState`] for the UI and for stores.
///
/// Counters are signed so that a damaged record still deserializes and can
/// be repaired by [`SessionState::from_snapshot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub total_xp: i64,
    pub current_streak: i64,
    pub best_streak: i64,
    pub problems_solved: i64,
    pub calculate_correct: i64,
    pub count_correct: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_updates_every_counter() {
        let mut s = SessionState::default();
        s.record_correct(Mode::Count, 15);
        assert_eq!(s.total_xp(), 15);
        assert_eq!(s.current_streak(), 1);
        assert_eq!(s.best_streak(), 1);
        assert_eq!(s.problems_solved(), 1);
        assert_eq!(s.correct_by_mode().get(Mode::Count), 1);
        assert_eq!(s.correct_by_mode().get(Mode::Calculate), 0);
    }

    #[test]
    fn incorrect_answer_only_resets_streak() {
        let mut s = SessionState::default();
        s.record_correct(Mode::Calculate, 10);
        s.record_correct(Mode::Calculate, 10);
        s.record_incorrect();
        assert_eq!(s.current_streak(), 0);
        assert_eq!(s.best_streak(), 2);
        assert_eq!(s.total_xp(), 20);
        assert_eq!(s.problems_solved(), 2);
    }

    #[test]
    fn best_streak_tracks_historical_maximum() {
        let mut s = SessionState::default();
        let pattern = [true, true, true, false, true, false, true, true, true, true, false, true];
        let mut running = 0u32;
        let mut max_seen = 0u32;
        for ok in pattern {
            if ok {
                s.record_correct(Mode::Calculate, 10);
                running += 1;
            } else {
                s.record_incorrect();
                running = 0;
            }
            max_seen = max_seen.max(running);
            assert_eq!(s.current_streak(), running);
            assert_eq!(s.best_streak(), max_seen);
            assert!(s.best_streak() >= s.current_streak());
        }
    }

    #[test]
    fn snapshot_round_trips_valid_state() {
        let mut s = SessionState::default();
        s.record_correct(Mode::Count, 30);
        s.record_correct(Mode::Calculate, 10);
        s.record_incorrect();
        assert_eq!(SessionState::from_snapshot(&s.snapshot()), s);
    }

    #[test]
    fn restore_repairs_corrupt_records() {
        let snap = SessionSnapshot {
            total_xp: -40,
            current_streak: 8,
            best_streak: 3,
            problems_solved: 12,
            calculate_correct: -1,
            count_correct: 4,
        };
        let s = SessionState::from_snapshot(&snap);
        assert_eq!(s.total_xp(), 0);
        assert_eq!(s.current_streak(), 8);
        assert_eq!(s.best_streak(), 8);
        assert_eq!(s.problems_solved(), 12);
        assert_eq!(s.correct_by_mode(), CorrectCounts { calculate: 0, count: 4 });
    }

    #[test]
    fn snapshot_tolerates_missing_fields() {
        let snap: SessionSnapshot = serde_json::from_str(r#"{"total_xp": 55}"#).unwrap();
        let s = SessionState::from_snapshot(&snap);
        assert_eq!(s.total_xp(), 55);
        assert_eq!(s.best_streak(), 0);
    }
}
