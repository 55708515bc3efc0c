//! # change_drill_gen
//!
//! An offline, deterministic engine for making-change practice.
//!
//! The engine synthesizes cash-register word problems (a bill, the cash a
//! customer hands over, and the change due), judges the student's answer,
//! and keeps score with an XP and streak system. Two practice modes share
//! the same problems:
//!
//! - **Calculate**: type the change due on a numpad.
//! - **Count**: build the change from bills and coins in a virtual till,
//!   optionally hiding the change-due and running-total readouts for bonus XP.
//!
//! ## How it works
//!
//! 1. Create a [`Trainer`] with a [`RandomSource`] and [`Settings`] (or open
//!    one from a [`ProgressStore`]). A first problem is dealt immediately.
//! 2. Feed it input: [`Trainer::press_key`], [`Trainer::add_to_held`], then
//!    [`Trainer::submit_current`], or call [`Trainer::submit`] directly.
//! 3. Read back the [`SubmitOutcome`] (XP earned, hint tier) and render
//!    [`to_client_view`] for the UI.
//!
//! ## Key features
//!
//! - **Exact money**: all amounts are integer cents ([`Money`]); typed
//!   answers are parsed as exact decimals, so the 0.001 tolerance is strict.
//! - **Deterministic**: seed a `StdRng` with [`source_from_seed`] or script
//!   draws with [`ScriptedSource`] to reproduce any problem.
//! - **Penny policy**: with pennies off, change rounds to the nearest nickel
//!   and the cash given is adjusted to match.
//!
//! ## Quick start
//!
//! ```rust
//! use change_drill_gen::{source_from_seed, Settings, Trainer, UserAnswer};
//!
//! let mut trainer = Trainer::new(source_from_seed(Some(42)), Settings::default());
//! let change = trainer.problem().change_due();
//!
//! let outcome = trainer.submit(UserAnswer::Typed(change.to_string())).unwrap();
//! assert!(outcome.correct);
//! assert_eq!(outcome.xp_earned, 10);
//! assert_eq!(trainer.session().current_streak(), 1);
//! ```

pub mod change_engine;

// Convenience re-exports so callers can use `change_drill_gen::Trainer`
// directly without reaching into `change_engine::`.
pub use change_engine::{
    compute_xp, evaluate, generate_problem, source_from_seed, to_client_view, Denomination,
    FeedbackCue, FeedbackSink, HiddenFields, HintTier, Judgement, Key, Mode, Money, Phase,
    Problem, ProgressRecord, ProgressStore, RandomSource, ScriptedSource, SessionSnapshot,
    SessionState, Settings, SubmitOutcome, Trainer, TrainerError, UserAnswer,
};
