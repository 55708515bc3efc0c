use std::fmt;
use serde::{Deserialize, Serialize};

use crate::change_engine::money::Money;

// ---------------------------------------------------------------------------
// Practice modes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// The student types the change due.
    #[default]
    Calculate,
    /// The student assembles the change from bills and coins in a virtual till.
    Count,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Calculate => write!(f, "CALCULATE"),
            Mode::Count     => write!(f, "COUNT CHANGE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Problem
// ---------------------------------------------------------------------------

/// One cash-register word problem. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Problem {
    bill: Money,
    cash_given: Money,
    change_due: Money,
}

impl Problem {
    /// Build a problem from the bill and the cash handed over.
    ///
    /// Change is derived, so `change_due == cash_given - bill` holds by
    /// construction. Returns `None` when the cash does not cover the bill.
    pub fn new(bill: Money, cash_given: Money) -> Option<Self> {
        if cash_given < bill {
            return None;
        }
        Some(Problem { bill, cash_given, change_due: cash_given - bill })
    }

    /// Build from the bill and an already-rounded change; cash is derived.
    pub(crate) fn from_change(bill: Money, change_due: Money) -> Self {
        debug_assert!(change_due >= Money::ZERO, "negative change {change_due} for bill {bill}");
        Problem { bill, cash_given: bill + change_due, change_due }
    }

    pub fn bill(&self) -> Money {
        self.bill
    }

    pub fn cash_given(&self) -> Money {
        self.cash_given
    }

    pub fn change_due(&self) -> Money {
        self.change_due
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bill ${}, cash ${}, change ${}", self.bill, self.cash_given, self.change_due)
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Which count-mode readouts the student chose to hide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiddenFields {
    pub change_due: bool,
    pub running_total: bool,
}

impl HiddenFields {
    pub fn count(self) -> u8 {
        self.change_due as u8 + self.running_total as u8
    }

    /// Hidden readouts that earn the difficulty bonus for an answer given in
    /// `mode`. Hiding is a count-mode mechanic, so calculate mode gets zero.
    pub fn bonus_count(self, mode: Mode) -> u8 {
        match mode {
            Mode::Calculate => 0,
            Mode::Count     => self.count(),
        }
    }
}

/// Student preferences that the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    /// When false, change is rounded to the nearest nickel and the penny
    /// leaves the till.
    pub penny_enabled: bool,
    pub sound_enabled: bool,
    pub hidden: HiddenFields,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mode: Mode::Calculate,
            penny_enabled: true,
            sound_enabled: true,
            hidden: HiddenFields::default(),
        }
    }
}

impl Settings {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_penny(mut self, enabled: bool) -> Self {
        self.penny_enabled = enabled;
        self
    }

    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    pub fn with_hidden(mut self, hidden: HiddenFields) -> Self {
        self.hidden = hidden;
        self
    }

    /// Hidden readouts that count toward the difficulty bonus in the
    /// current mode.
    pub fn effective_hidden_count(&self) -> u8 {
        self.hidden.bonus_count(self.mode)
    }
}

// ---------------------------------------------------------------------------
// Answers and outcomes
// ---------------------------------------------------------------------------

/// What the student submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserAnswer {
    /// Calculate mode: raw text as typed. Empty or unparsable text reads as 0.
    Typed(String),
    /// Count mode: the sum of the held bills and coins.
    Counted(Money),
}

impl UserAnswer {
    pub fn mode(&self) -> Mode {
        match self {
            UserAnswer::Typed(_)   => Mode::Calculate,
            UserAnswer::Counted(_) => Mode::Count,
        }
    }
}

/// Guidance tier for a wrong calculate-mode answer, picked from how far off it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintTier {
    /// Off by more than a dollar.
    LargeScale,
    /// Off by more than a quarter.
    Cents,
    /// Close; most likely a misplaced decimal or a slip in the last digit.
    DecimalPlace,
}

impl HintTier {
    pub fn message(self) -> &'static str {
        match self {
            HintTier::LargeScale   => "Try breaking down the problem: subtract the bill from the cash given.",
            HintTier::Cents        => "You're close! Double-check your cents calculation.",
            HintTier::DecimalPlace => "Almost there! Check your decimal place.",
        }
    }
}

/// Pure verdict on one answer, before any state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    pub correct: bool,
    /// Absolute distance from the change due, in millionths of a currency unit.
    pub difference_micros: i64,
    pub hint: Option<HintTier>,
}

/// How an XP reward was put together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    pub base: u32,
    pub difficulty_bonus: u32,
    pub streak_multiplier: u32,
    pub total: u32,
}

/// Result of [`Trainer::submit`](super::trainer::Trainer::submit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub xp_earned: u32,
    pub award: Option<XpAward>,
    pub hint: Option<HintTier>,
}

/// Where the trainer sits between problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// A problem is live and submit is enabled.
    AwaitingAnswer,
    /// The problem was solved; submit stays disabled until a new one is requested.
    AwaitingNextProblem,
}
