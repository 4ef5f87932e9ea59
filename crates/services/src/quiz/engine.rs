use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use quiz_core::Clock;
use quiz_core::draw::{IndexPicker, RandomPicker};
use quiz_core::model::{QuestionBank, QuizSettings, QuizSummary};

use super::cues::{CueSink, NoopCues};
use super::phase::{QuizAction, QuizPhase};
use super::session::QuizSession;
use super::view::{FeedbackView, FinishedView, NextStateView, QuestionView};
use crate::error::QuizError;

/// Discrete input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    Start,
    /// 0-based option index.
    Select(usize),
    Advance,
    Restart,
}

/// What the host should display after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizRender {
    Question(QuestionView),
    Feedback(FeedbackView),
    Finished(FinishedView),
}

impl From<NextStateView> for QuizRender {
    fn from(view: NextStateView) -> Self {
        match view {
            NextStateView::Question(q) => Self::Question(q),
            NextStateView::Finished(f) => Self::Finished(f),
        }
    }
}

/// Owns the loaded bank and drives sessions from host events.
///
/// The engine assumes exclusive access: hosts that receive input on several
/// threads must serialize calls before they reach it.
pub struct QuizEngine<P = RandomPicker> {
    bank: Arc<QuestionBank>,
    settings: QuizSettings,
    picker: P,
    clock: Clock,
    cues: Arc<dyn CueSink>,
    session: Option<QuizSession>,
    history: Vec<QuizSummary>,
}

impl<P: IndexPicker> QuizEngine<P> {
    /// Create an idle engine.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Config` if the bank is smaller than the session size.
    pub fn new(
        bank: Arc<QuestionBank>,
        settings: QuizSettings,
        picker: P,
    ) -> Result<Self, QuizError> {
        settings.validate_bank(&bank)?;
        Ok(Self {
            bank,
            settings,
            picker,
            clock: Clock::default_clock(),
            cues: Arc::new(NoopCues),
            session: None,
            history: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_cues(mut self, cues: Arc<dyn CueSink>) -> Self {
        self.cues = cues;
        self
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session
            .as_ref()
            .map_or(QuizPhase::Idle, QuizSession::phase)
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Summaries of every session finished by this engine, oldest first.
    #[must_use]
    pub fn history(&self) -> &[QuizSummary] {
        &self.history
    }

    /// Dispatch a host event.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` if the event does not apply to the
    /// current phase, plus the errors of the individual operations.
    pub fn on_event(&mut self, event: QuizEvent) -> Result<QuizRender, QuizError> {
        match event {
            QuizEvent::Start => self.start().map(QuizRender::Question),
            QuizEvent::Select(index) => self.select(index).map(QuizRender::Feedback),
            QuizEvent::Advance => self.advance().map(QuizRender::from),
            QuizEvent::Restart => self.restart().map(QuizRender::Question),
        }
    }

    /// Start the first session, or the next one after a finished session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` while a session is in progress.
    pub fn start(&mut self) -> Result<QuestionView, QuizError> {
        match self.phase() {
            QuizPhase::Idle => self.start_fresh(),
            QuizPhase::Finished => self.restart(),
            phase => Err(QuizError::invalid(QuizAction::Start, phase)),
        }
    }

    /// Replace a finished session with a fresh draw. With no session yet,
    /// this starts the first one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` while a session is in progress.
    pub fn restart(&mut self) -> Result<QuestionView, QuizError> {
        let Some(previous) = self.session.as_ref() else {
            return self.start_fresh();
        };
        let next = previous.restart(&mut self.picker, self.clock.now())?;
        debug!(previous = %previous.id(), excluded = ?previous.drawn_indices(), "restarting quiz");
        self.begin(next)
    }

    /// Lock in the option at `index` for the displayed question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Label` for an index above 3 and
    /// `QuizError::InvalidTransition` unless a question is showing.
    pub fn select(&mut self, index: usize) -> Result<FeedbackView, QuizError> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| QuizError::invalid(QuizAction::Select, QuizPhase::Idle))?;
        let view = session.select_index(index)?;
        debug!(
            session = %session.id(),
            question = session.cursor(),
            selected = %view.selected,
            correct = view.is_correct,
            "option selected"
        );
        self.cues.cue(view.cue);
        Ok(view)
    }

    /// Move to the next question or the final score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless feedback is showing.
    pub fn advance(&mut self) -> Result<NextStateView, QuizError> {
        let now = self.clock.now();
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| QuizError::invalid(QuizAction::Advance, QuizPhase::Idle))?;
        let next = session.advance(now)?;

        match &next {
            NextStateView::Question(view) => {
                debug!(session = %session.id(), question = view.number, "question shown");
            }
            NextStateView::Finished(view) => {
                info!(
                    session = %session.id(),
                    correct = view.correct,
                    wrong = view.wrong,
                    tier = ?view.tier,
                    "quiz finished"
                );
                if let Some(summary) = session.summary() {
                    self.history.push(summary.clone());
                }
            }
        }

        Ok(next)
    }

    fn start_fresh(&mut self) -> Result<QuestionView, QuizError> {
        let session = QuizSession::start(
            Arc::clone(&self.bank),
            self.settings,
            &HashSet::new(),
            &mut self.picker,
            self.clock.now(),
        )?;
        self.begin(session)
    }

    fn begin(&mut self, session: QuizSession) -> Result<QuestionView, QuizError> {
        let view = session
            .question_view()
            .ok_or_else(|| QuizError::invalid(QuizAction::Start, session.phase()))?;
        debug!(
            session = %session.id(),
            drawn = ?session.drawn_indices(),
            "quiz started"
        );
        self.session = Some(session);
        Ok(view)
    }
}
