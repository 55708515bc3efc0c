use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Audible or haptic cue the presentation layer may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackCue {
    KeyTap,
    BillTap,
    CoinTap,
    UiTap,
    Success,
    Error,
}

/// Receiver for feedback cues. Implementations must not block.
pub trait FeedbackSink {
    fn cue(&mut self, cue: FeedbackCue);
}

/// Stands in when no audio device is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFeedback;

impl FeedbackSink for NoopFeedback {
    fn cue(&mut self, _cue: FeedbackCue) {}
}

/// Collects cues in order for hosts that batch playback.
///
/// Clones share one log, so a host keeps a handle while the trainer owns
/// the sink.
#[derive(Debug, Clone, Default)]
pub struct RecordedFeedback {
    cues: Rc<RefCell<Vec<FeedbackCue>>>,
}

impl RecordedFeedback {
    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<FeedbackCue> {
        std::mem::take(&mut *self.cues.borrow_mut())
    }
}

impl FeedbackSink for RecordedFeedback {
    fn cue(&mut self, cue: FeedbackCue) {
        self.cues.borrow_mut().push(cue);
    }
}

impl<F: FeedbackSink + ?Sized> FeedbackSink for Box<F> {
    fn cue(&mut self, cue: FeedbackCue) {
        (**self).cue(cue)
    }
}
