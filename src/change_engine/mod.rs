//! Core change-trainer engine: problem synthesis, answer judging, rewards,
//! and the session state machine.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `money`     | Integer-cents currency type, parsing and rounding helpers |
//! | `models`    | Shared types: problems, settings, answers, outcomes |
//! | `random`    | `RandomSource` seam, seeded and scripted sources |
//! | `generator` | Bill draw, cash-given candidates, penny rounding |
//! | `evaluator` | Exact-decimal answer judging and hint tiers |
//! | `reward`    | XP with difficulty bonus and streak multiplier |
//! | `till`      | Denominations, held currency, numpad buffer |
//! | `session`   | Progress counters and their snapshot form |
//! | `trainer`   | Engine facade and phase transitions |
//! | `feedback`  | Cue sink for sound or haptics |
//! | `store`     | Progress persistence collaborators |
//! | `view`      | JSON payload for a front end |
//! | `error`     | Error types for stores and trainer misuse |

pub mod error;
pub mod evaluator;
pub mod feedback;
pub mod generator;
pub mod models;
pub mod money;
pub mod random;
pub mod reward;
pub mod session;
pub mod store;
pub mod till;
pub mod trainer;
pub mod view;

// Re-export the public API surface so callers can use
// `change_engine::Trainer` without reaching into sub-modules.
pub use error::{MoneyParseError, StoreError, TrainerError};
pub use evaluator::{evaluate, hint_tier, parse_answer_micros, TOLERANCE_MICROS};
pub use feedback::{FeedbackCue, FeedbackSink, NoopFeedback, RecordedFeedback};
pub use generator::{cash_candidates, generate_problem, problem_for_bill, BILL_MAX, BILL_MIN};
pub use models::{
    HiddenFields, HintTier, Judgement, Mode, Phase, Problem, Settings, SubmitOutcome,
    UserAnswer, XpAward,
};
pub use money::Money;
pub use random::{source_from_seed, RandomSource, ScriptedSource};
pub use reward::{compute_xp, streak_multiplier, xp_award};
pub use session::{CorrectCounts, SessionSnapshot, SessionState};
pub use store::{FallbackStore, JsonFileStore, MemoryStore, ProgressRecord, ProgressStore};
pub use till::{CurrencyKind, Denomination, HeldCurrency, HeldItem, InputBuffer, Key};
pub use trainer::Trainer;
pub use view::to_client_view;
