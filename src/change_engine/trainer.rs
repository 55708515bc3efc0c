//! The engine facade a front end drives.
//!
//! A [`Trainer`] owns one student's practice loop: the live problem, the
//! till and numpad state, the progress counters, and the collaborators
//! (feedback sink, progress store). Every method completes synchronously.
//!
//! ```text
//! AwaitingAnswer --correct--> AwaitingNextProblem
//!       ^  |                          |
//!       |  +--incorrect (retry)--+    |
//!       +------- request_new_problem -+
//! ```

use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::change_engine::{
    error::TrainerError,
    evaluator::evaluate,
    feedback::{FeedbackCue, FeedbackSink, NoopFeedback},
    generator::generate_problem,
    models::{Mode, Phase, Problem, Settings, SubmitOutcome, UserAnswer},
    money::Money,
    random::RandomSource,
    reward::xp_award,
    session::{SessionSnapshot, SessionState},
    store::{ProgressRecord, ProgressStore},
    till::{CurrencyKind, Denomination, HeldCurrency, InputBuffer, Key},
};

pub struct Trainer<R: RandomSource = StdRng> {
    rng: R,
    settings: Settings,
    problem: Problem,
    phase: Phase,
    held: HeldCurrency,
    input: InputBuffer,
    session: SessionState,
    feedback: Box<dyn FeedbackSink>,
    store: Option<Box<dyn ProgressStore>>,
}

impl<R: RandomSource> Trainer<R> {
    /// Fresh session with no persistence; the first problem is ready.
    pub fn new(rng: R, settings: Settings) -> Self {
        Self::assemble(rng, settings, SessionState::default(), None)
    }

    /// Restore settings and progress from `store`, then keep saving to it.
    ///
    /// A missing record starts a fresh one. A failing store is logged and
    /// the session starts fresh; the store stays attached for later saves.
    pub fn open(rng: R, mut store: impl ProgressStore + 'static) -> Self {
        let (settings, session, fresh) = match store.load() {
            Ok(Some(record)) => (record.settings, SessionState::from_snapshot(&record.snapshot), false),
            Ok(None) => (Settings::default(), SessionState::default(), true),
            Err(e) => {
                warn!("could not load progress, starting fresh: {e}");
                (Settings::default(), SessionState::default(), false)
            }
        };
        let store: Box<dyn ProgressStore> = Box::new(store);
        let mut trainer = Self::assemble(rng, settings, session, Some(store));
        if fresh {
            trainer.persist();
        }
        trainer
    }

    fn assemble(
        mut rng: R,
        settings: Settings,
        session: SessionState,
        store: Option<Box<dyn ProgressStore>>,
    ) -> Self {
        let problem = generate_problem(&mut rng, settings.penny_enabled);
        Trainer {
            rng,
            settings,
            problem,
            phase: Phase::AwaitingAnswer,
            held: HeldCurrency::default(),
            input: InputBuffer::default(),
            session,
            feedback: Box::new(NoopFeedback),
            store,
        }
    }

    /// Route cues to `sink` instead of discarding them.
    pub fn with_feedback(mut self, sink: impl FeedbackSink + 'static) -> Self {
        self.feedback = Box::new(sink);
        self
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn held(&self) -> &HeldCurrency {
        &self.held
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn submit_enabled(&self) -> bool {
        self.phase == Phase::AwaitingAnswer
    }

    // ── problem lifecycle ────────────────────────────────────────────────

    /// Discard the current problem, till and typed input, and deal a new one.
    /// Allowed from any phase.
    pub fn request_new_problem(&mut self) -> &Problem {
        self.problem = generate_problem(&mut self.rng, self.settings.penny_enabled);
        self.held.clear();
        self.input.clear();
        self.phase = Phase::AwaitingAnswer;
        &self.problem
    }

    /// Judge `answer` and apply the matching transition.
    ///
    /// Correct: XP is computed from the streak *before* this answer, the
    /// counters advance, and submit locks until a new problem is requested.
    /// Incorrect: the streak resets and the same problem stays open.
    pub fn submit(&mut self, answer: UserAnswer) -> Result<SubmitOutcome, TrainerError> {
        if self.phase == Phase::AwaitingNextProblem {
            return Err(TrainerError::SubmitDisabled);
        }

        let mode = answer.mode();
        let judgement = evaluate(&self.problem, &answer);

        let outcome = if judgement.correct {
            let hidden = self.settings.hidden.bonus_count(mode);
            let award = xp_award(mode, self.session.current_streak(), hidden);
            self.session.record_correct(mode, award.total);
            self.phase = Phase::AwaitingNextProblem;
            self.emit(FeedbackCue::Success);
            SubmitOutcome { correct: true, xp_earned: award.total, award: Some(award), hint: None }
        } else {
            self.session.record_incorrect();
            self.emit(FeedbackCue::Error);
            SubmitOutcome { correct: false, xp_earned: 0, award: None, hint: judgement.hint }
        };

        debug!(
            %mode,
            correct = outcome.correct,
            xp = outcome.xp_earned,
            streak = self.session.current_streak(),
            "answer judged"
        );
        self.persist();
        Ok(outcome)
    }

    /// Submit whatever the active mode has collected: the typed text in
    /// calculate mode, the till total in count mode.
    pub fn submit_current(&mut self) -> Result<SubmitOutcome, TrainerError> {
        let answer = match self.settings.mode {
            Mode::Calculate => UserAnswer::Typed(self.input.as_str().to_string()),
            Mode::Count     => UserAnswer::Counted(self.held.total()),
        };
        self.submit(answer)
    }

    // ── answer input ─────────────────────────────────────────────────────

    pub fn press_key(&mut self, key: Key) {
        self.emit(FeedbackCue::KeyTap);
        self.input.press(key);
    }

    /// Drop a bill or coin into the till and return the new total.
    pub fn add_to_held(&mut self, denomination: Denomination) -> Result<Money, TrainerError> {
        if !self.settings.penny_enabled && denomination == Denomination::Penny {
            return Err(TrainerError::DenominationUnavailable(denomination));
        }
        self.emit(match denomination.kind() {
            CurrencyKind::Bill => FeedbackCue::BillTap,
            CurrencyKind::Coin => FeedbackCue::CoinTap,
        });
        self.held.push(denomination);
        Ok(self.held.total())
    }

    pub fn clear_held(&mut self) {
        self.held.clear();
    }

    // ── settings ─────────────────────────────────────────────────────────

    /// Change practice mode. Always deals a new problem.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.emit(FeedbackCue::UiTap);
        self.settings.mode = mode;
        self.request_new_problem();
        self.persist();
    }

    /// Change the penny policy. Deals a new problem under the new policy.
    pub fn set_penny_enabled(&mut self, enabled: bool) {
        self.settings.penny_enabled = enabled;
        self.request_new_problem();
        self.persist();
    }

    /// Turning sound on plays a tap so the student hears it worked.
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        if enabled {
            self.emit(FeedbackCue::UiTap);
        }
        self.persist();
    }

    /// Hide or reveal the change-due readout. Count mode only; returns the
    /// resulting hidden state.
    pub fn toggle_change_due_hidden(&mut self) -> bool {
        if self.settings.mode == Mode::Count {
            self.settings.hidden.change_due = !self.settings.hidden.change_due;
            self.persist();
        }
        self.settings.hidden.change_due
    }

    /// Hide or reveal the running till total; returns the resulting state.
    pub fn toggle_total_hidden(&mut self) -> bool {
        self.settings.hidden.running_total = !self.settings.hidden.running_total;
        self.persist();
        self.settings.hidden.running_total
    }

    // ── progress ─────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Replace progress with a collaborator-supplied snapshot, repairing it
    /// if it is inconsistent.
    pub fn load_snapshot(&mut self, snapshot: &SessionSnapshot) {
        self.session = SessionState::from_snapshot(snapshot);
    }

    pub fn record(&self) -> ProgressRecord {
        ProgressRecord { snapshot: self.snapshot(), settings: self.settings }
    }

    fn persist(&mut self) {
        let record = self.record();
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.save(&record) {
                warn!("failed to save progress: {e}");
            }
        }
    }

    fn emit(&mut self, cue: FeedbackCue) {
        if self.settings.sound_enabled {
            self.feedback.cue(cue);
        }
    }
}
