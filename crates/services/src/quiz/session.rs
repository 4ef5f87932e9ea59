use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use quiz_core::draw::{IndexPicker, draw};
use quiz_core::model::{
    OptionLabel, QuestionBank, QuestionEntry, QuizSettings, QuizSummary, SessionId,
};

use super::phase::{QuizAction, QuizPhase};
use super::progress::SessionProgress;
use super::view::{FeedbackView, FinishedView, NextStateView, QuestionView};
use crate::error::QuizError;

/// The locked-in answer for the question currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub selected: OptionLabel,
    pub correct: Option<OptionLabel>,
    pub is_correct: bool,
}

/// One run of `session_size` questions, from draw to final score.
///
/// A session is never reused: `restart` returns a new value drawn with this
/// session's questions excluded once. Transitions that are not valid for the
/// current phase return `QuizError::InvalidTransition` and leave the session
/// unchanged.
pub struct QuizSession {
    id: SessionId,
    bank: Arc<QuestionBank>,
    settings: QuizSettings,
    drawn: Vec<usize>,
    cursor: usize,
    correct: usize,
    wrong: usize,
    phase: QuizPhase,
    last_answer: Option<AnswerRecord>,
    started_at: DateTime<Utc>,
    summary: Option<QuizSummary>,
}

impl QuizSession {
    /// Draw a session and show its first question.
    ///
    /// `excluded` holds bank indices to skip for this draw; they are ignored
    /// when too few questions would remain.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Config` if the bank cannot fill a session.
    pub fn start(
        bank: Arc<QuestionBank>,
        settings: QuizSettings,
        excluded: &HashSet<usize>,
        picker: &mut impl IndexPicker,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        settings.validate_bank(&bank)?;
        let drawn = draw(bank.len(), settings.session_size(), excluded, picker)?.into_indices();

        Ok(Self {
            id: SessionId::new(),
            bank,
            settings,
            drawn,
            cursor: 1,
            correct: 0,
            wrong: 0,
            phase: QuizPhase::Showing,
            last_answer: None,
            started_at,
            summary: None,
        })
    }

    /// Start the next session, excluding this session's questions once.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless the session is finished.
    pub fn restart(
        &self,
        picker: &mut impl IndexPicker,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if self.phase != QuizPhase::Finished {
            return Err(QuizError::invalid(QuizAction::Restart, self.phase));
        }
        Self::start(
            Arc::clone(&self.bank),
            self.settings,
            &self.exclusions(),
            picker,
            started_at,
        )
    }

    /// Lock in an answer for the displayed question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless a question is showing.
    pub fn select_option(&mut self, label: OptionLabel) -> Result<FeedbackView, QuizError> {
        if self.phase != QuizPhase::Showing {
            return Err(QuizError::invalid(QuizAction::Select, self.phase));
        }
        let entry = self
            .current_entry()
            .ok_or_else(|| QuizError::invalid(QuizAction::Select, self.phase))?;
        let view = FeedbackView::new(label, entry);

        if view.is_correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
        self.last_answer = Some(AnswerRecord {
            selected: label,
            correct: view.correct,
            is_correct: view.is_correct,
        });
        self.phase = QuizPhase::Answered;

        Ok(view)
    }

    /// Select by 0-based option index.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Label` for an index above 3, otherwise as `select_option`.
    pub fn select_index(&mut self, index: usize) -> Result<FeedbackView, QuizError> {
        let label = OptionLabel::from_index(index)?;
        self.select_option(label)
    }

    /// Move past the feedback to the next question or the final score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless feedback is showing.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<NextStateView, QuizError> {
        if self.phase != QuizPhase::Answered {
            return Err(QuizError::invalid(QuizAction::Advance, self.phase));
        }

        if self.cursor < self.drawn.len() {
            self.cursor += 1;
            self.phase = QuizPhase::Showing;
            self.last_answer = None;
            let view = self
                .question_view()
                .ok_or_else(|| QuizError::invalid(QuizAction::Advance, self.phase))?;
            return Ok(NextStateView::Question(view));
        }

        // A clock that stepped backwards still finishes the session.
        let finished_at = now.max(self.started_at);
        let summary = QuizSummary::new(
            self.id,
            self.started_at,
            finished_at,
            self.correct,
            self.wrong,
            self.drawn.len(),
        )?;
        let view = FinishedView::from_summary(&summary);
        self.summary = Some(summary);
        self.phase = QuizPhase::Finished;
        self.last_answer = None;

        Ok(NextStateView::Finished(view))
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn session_size(&self) -> usize {
        self.drawn.len()
    }

    /// Number of questions shown so far, including the current one.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.wrong
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.correct + self.wrong
    }

    /// Bank indices of this session's questions, in presentation order.
    #[must_use]
    pub fn drawn_indices(&self) -> &[usize] {
        &self.drawn
    }

    /// Indices the next draw should skip.
    #[must_use]
    pub fn exclusions(&self) -> HashSet<usize> {
        self.drawn.iter().copied().collect()
    }

    #[must_use]
    pub fn last_answer(&self) -> Option<AnswerRecord> {
        self.last_answer
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Final summary, available once the session is finished.
    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    /// The question at the cursor while showing or answered.
    #[must_use]
    pub fn current_entry(&self) -> Option<&QuestionEntry> {
        if !matches!(self.phase, QuizPhase::Showing | QuizPhase::Answered) {
            return None;
        }
        let slot = self.cursor.checked_sub(1)?;
        let bank_index = *self.drawn.get(slot)?;
        self.bank.get(bank_index)
    }

    #[must_use]
    pub fn question_view(&self) -> Option<QuestionView> {
        self.current_entry()
            .map(|entry| QuestionView::from_entry(self.cursor, self.drawn.len(), entry))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        SessionProgress {
            total: self.drawn.len(),
            answered,
            remaining: self.drawn.len().saturating_sub(answered),
            is_complete: self.is_complete(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("bank_len", &self.bank.len())
            .field("drawn", &self.drawn)
            .field("cursor", &self.cursor)
            .field("correct", &self.correct)
            .field("wrong", &self.wrong)
            .field("phase", &self.phase)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::draw::SequencePicker;
    use quiz_core::model::ScoreTier;
    use quiz_core::time::fixed_now;

    fn build_bank(n: usize) -> Arc<QuestionBank> {
        let labels = OptionLabel::ALL;
        let entries = (0..n)
            .map(|i| {
                QuestionEntry::new(
                    format!("Q{i}"),
                    ["w", "x", "y", "z"].map(|s| format!("{s}{i}")),
                    Some(labels[i % 4]),
                )
            })
            .collect();
        Arc::new(QuestionBank::new(entries).unwrap())
    }

    fn start(n: usize) -> QuizSession {
        QuizSession::start(
            build_bank(n),
            QuizSettings::default(),
            &HashSet::new(),
            &mut SequencePicker::first(),
            fixed_now(),
        )
        .unwrap()
    }

    fn answer_all(session: &mut QuizSession, correct: bool) -> NextStateView {
        loop {
            let entry_answer = session.current_entry().unwrap().answer().unwrap();
            let label = if correct {
                entry_answer
            } else {
                OptionLabel::from_index((entry_answer.index() + 1) % 4).unwrap()
            };
            session.select_option(label).unwrap();
            let next = session.advance(fixed_now()).unwrap();
            if matches!(next, NextStateView::Finished(_)) {
                return next;
            }
        }
    }

    #[test]
    fn start_shows_first_question() {
        let session = start(8);
        assert_eq!(session.phase(), QuizPhase::Showing);
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.session_size(), 5);
        assert_eq!(session.drawn_indices(), &[0, 1, 2, 3, 4]);
        let view = session.question_view().unwrap();
        assert_eq!(view.number, 1);
        assert_eq!(view.prompt, "Q0");
    }

    #[test]
    fn start_rejects_small_bank() {
        let err = QuizSession::start(
            build_bank(4),
            QuizSettings::default(),
            &HashSet::new(),
            &mut SequencePicker::first(),
            fixed_now(),
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::Config(_)));
    }

    #[test]
    fn selecting_records_outcome_and_locks_options() {
        let mut session = start(5);
        let view = session.select_option(OptionLabel::A).unwrap();
        assert!(view.is_correct);
        assert_eq!(session.phase(), QuizPhase::Answered);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(
            session.last_answer(),
            Some(AnswerRecord {
                selected: OptionLabel::A,
                correct: Some(OptionLabel::A),
                is_correct: true
            })
        );

        let err = session.select_option(OptionLabel::B).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                action: QuizAction::Select,
                phase: QuizPhase::Answered
            }
        ));
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.wrong_count(), 0);
    }

    #[test]
    fn finishing_with_an_earlier_clock_still_reaches_finished() {
        let mut session = start(5);
        let earlier = fixed_now() - chrono::Duration::seconds(1);
        for _ in 0..4 {
            session.select_option(OptionLabel::A).unwrap();
            session.advance(fixed_now()).unwrap();
        }
        session.select_option(OptionLabel::A).unwrap();

        let next = session.advance(earlier).unwrap();
        assert!(matches!(next, NextStateView::Finished(_)));
        assert_eq!(session.phase(), QuizPhase::Finished);
        let summary = session.summary().unwrap();
        assert_eq!(summary.finished_at(), summary.started_at());

        let again = session.restart(&mut SequencePicker::first(), earlier).unwrap();
        assert_eq!(again.phase(), QuizPhase::Showing);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut session = start(5);
        let err = session.advance(fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                action: QuizAction::Advance,
                phase: QuizPhase::Showing
            }
        ));
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn invalid_index_leaves_state_untouched() {
        let mut session = start(5);
        let err = session.select_index(4).unwrap_err();
        assert!(matches!(err, QuizError::Label(_)));
        assert_eq!(session.phase(), QuizPhase::Showing);
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn counts_match_cursor_through_the_session() {
        let mut session = start(7);
        for step in 1..=5 {
            assert_eq!(session.cursor(), step);
            assert_eq!(session.answered_count(), step - 1);
            session.select_index(step % 4).unwrap();
            assert_eq!(session.answered_count(), session.cursor());
            session.advance(fixed_now()).unwrap();
        }
        assert!(session.is_complete());
        assert_eq!(session.correct_count() + session.wrong_count(), 5);
        assert!(session.current_entry().is_none());
    }

    #[test]
    fn perfect_session_finishes_with_perfect_tier() {
        let mut session = start(5);
        let next = answer_all(&mut session, true);
        let NextStateView::Finished(view) = next else {
            panic!("expected finished view");
        };
        assert_eq!(view.correct, 5);
        assert_eq!(view.wrong, 0);
        assert_eq!(view.tier, ScoreTier::Perfect);
        assert!(view.can_retry);
        assert_eq!(session.summary().unwrap().tier(), ScoreTier::Perfect);
    }

    #[test]
    fn all_wrong_finishes_with_encouragement() {
        let mut session = start(6);
        let NextStateView::Finished(view) = answer_all(&mut session, false) else {
            panic!("expected finished view");
        };
        assert_eq!(view.wrong, 5);
        assert_eq!(view.tier, ScoreTier::Encouragement);
    }

    #[test]
    fn finished_session_rejects_play() {
        let mut session = start(5);
        answer_all(&mut session, true);

        assert!(matches!(
            session.select_option(OptionLabel::A),
            Err(QuizError::InvalidTransition { phase: QuizPhase::Finished, .. })
        ));
        assert!(matches!(
            session.advance(fixed_now()),
            Err(QuizError::InvalidTransition { phase: QuizPhase::Finished, .. })
        ));
        assert_eq!(session.correct_count(), 5);
    }

    #[test]
    fn restart_requires_finished_session() {
        let session = start(5);
        let err = session
            .restart(&mut SequencePicker::first(), fixed_now())
            .unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                action: QuizAction::Restart,
                phase: QuizPhase::Showing
            }
        ));
    }

    #[test]
    fn restart_excludes_previous_draw_once() {
        let mut first = start(10);
        answer_all(&mut first, true);

        let second = first
            .restart(&mut SequencePicker::first(), fixed_now())
            .unwrap();
        assert_eq!(second.drawn_indices(), &[5, 6, 7, 8, 9]);
        assert_eq!(second.correct_count(), 0);
        assert_eq!(second.cursor(), 1);
        assert_ne!(second.id(), first.id());
        // The finished session is untouched.
        assert!(first.is_complete());
        assert_eq!(first.drawn_indices(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn restart_with_six_questions_uses_full_bank() {
        let mut first = start(6);
        answer_all(&mut first, true);
        assert_eq!(first.drawn_indices(), &[0, 1, 2, 3, 4]);

        // Only index 5 is outside the exclusion set, so the whole bank is eligible.
        let second = first
            .restart(&mut SequencePicker::new(vec![0, 0, 0, 0, 0]), fixed_now())
            .unwrap();
        assert_eq!(second.drawn_indices(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn sentinel_question_is_never_correct() {
        let entries = (0..5)
            .map(|i| QuestionEntry::new(format!("Q{i}"), ["a", "b", "c", "d"].map(String::from), None))
            .collect();
        let bank = Arc::new(QuestionBank::new(entries).unwrap());
        let mut session = QuizSession::start(
            bank,
            QuizSettings::default(),
            &HashSet::new(),
            &mut SequencePicker::first(),
            fixed_now(),
        )
        .unwrap();

        for index in 0..5 {
            let view = session.select_index(index % 4).unwrap();
            assert!(!view.is_correct);
            session.advance(fixed_now()).unwrap();
        }
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.wrong_count(), 5);
    }

    #[test]
    fn progress_reports_remaining() {
        let mut session = start(5);
        session.select_index(0).unwrap();
        let progress = session.progress();
        assert_eq!(progress.total, 5);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.remaining, 4);
        assert!(!progress.is_complete);
    }
}
