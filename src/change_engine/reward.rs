use crate::change_engine::models::{Mode, XpAward};

pub const CALCULATE_BASE_XP: u32 = 10;
pub const COUNT_BASE_XP: u32 = 15;
pub const HIDDEN_ONE_BONUS: u32 = 5;
pub const HIDDEN_BOTH_BONUS: u32 = 15;
pub const STREAK_THRESHOLD: u32 = 5;
pub const STREAK_MULTIPLIER_MAX: u32 = 3;

/// Multiplier for a streak, counted before the current answer: one step
/// every `STREAK_THRESHOLD` correct answers, capped at `STREAK_MULTIPLIER_MAX`.
pub fn streak_multiplier(streak_before: u32) -> u32 {
    (streak_before / STREAK_THRESHOLD + 1).min(STREAK_MULTIPLIER_MAX)
}

fn difficulty_bonus(mode: Mode, hidden_count: u8) -> u32 {
    match (mode, hidden_count) {
        (Mode::Calculate, _) => 0,
        (Mode::Count, 0)     => 0,
        (Mode::Count, 1)     => HIDDEN_ONE_BONUS,
        (Mode::Count, _)     => HIDDEN_BOTH_BONUS,
    }
}

/// Full breakdown of the XP for a correct answer.
pub fn xp_award(mode: Mode, streak_before: u32, hidden_count: u8) -> XpAward {
    let base = match mode {
        Mode::Calculate => CALCULATE_BASE_XP,
        Mode::Count     => COUNT_BASE_XP,
    };
    let bonus = difficulty_bonus(mode, hidden_count);
    let multiplier = streak_multiplier(streak_before);
    XpAward {
        base,
        difficulty_bonus: bonus,
        streak_multiplier: multiplier,
        total: (base + bonus) * multiplier,
    }
}

/// XP earned for a correct answer.
pub fn compute_xp(mode: Mode, streak_before: u32, hidden_count: u8) -> u32 {
    xp_award(mode, streak_before, hidden_count).total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_rewards_per_mode() {
        assert_eq!(compute_xp(Mode::Calculate, 0, 0), 10);
        assert_eq!(compute_xp(Mode::Count, 0, 0), 15);
    }

    #[test]
    fn hidden_fields_only_pay_in_count_mode() {
        assert_eq!(compute_xp(Mode::Count, 0, 1), 20);
        assert_eq!(compute_xp(Mode::Count, 0, 2), 30);
        assert_eq!(compute_xp(Mode::Count, 0, 9), 30);
        assert_eq!(compute_xp(Mode::Calculate, 0, 2), 10);
    }

    #[test]
    fn streak_multiplier_steps_and_caps() {
        assert_eq!(streak_multiplier(0), 1);
        assert_eq!(streak_multiplier(4), 1);
        assert_eq!(streak_multiplier(5), 2);
        assert_eq!(streak_multiplier(9), 2);
        assert_eq!(streak_multiplier(10), 3);
        assert_eq!(streak_multiplier(29), 3);
        assert_eq!(streak_multiplier(u32::MAX), 3);
    }

    #[test]
    fn reference_rewards() {
        assert_eq!(compute_xp(Mode::Calculate, 0, 0), 10);
        assert_eq!(compute_xp(Mode::Count, 5, 2), 60);
        assert_eq!(compute_xp(Mode::Calculate, 29, 0), 30);
    }

    #[test]
    fn award_breakdown_adds_up() {
        let award = xp_award(Mode::Count, 7, 1);
        assert_eq!(award.base, 15);
        assert_eq!(award.difficulty_bonus, 5);
        assert_eq!(award.streak_multiplier, 2);
        assert_eq!(award.total, 40);
    }
}
