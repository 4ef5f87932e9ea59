//! Presentation-agnostic render payloads.
//!
//! The host turns these into widgets; the only pre-formatted strings are the
//! feedback and result messages the quiz has always shown.

use serde::Serialize;

use quiz_core::model::{OptionLabel, QuestionEntry, QuizSummary, ScoreTier};

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub label: OptionLabel,
    pub text: String,
}

/// Payload for entering `Showing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// 1-based position within the session.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: [OptionView; 4],
}

impl QuestionView {
    #[must_use]
    pub fn from_entry(number: usize, total: usize, entry: &QuestionEntry) -> Self {
        Self {
            number,
            total,
            prompt: entry.prompt().to_string(),
            options: OptionLabel::ALL.map(|label| OptionView {
                label,
                text: entry.option(label).to_string(),
            }),
        }
    }

    #[must_use]
    pub fn heading(&self) -> String {
        format!("Question {}: {}", self.number, self.prompt)
    }
}

//
// ─── FEEDBACK ─────────────────────────────────────────────────────────────────
//

/// Outcome coloring for one option after a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    Neutral,
    Correct,
    Incorrect,
}

/// Side-effect the host may play after a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCue {
    Correct,
    Wrong,
}

/// Payload for entering `Answered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
    pub selected: OptionLabel,
    /// `None` when the question has no valid answer.
    pub correct: Option<OptionLabel>,
    pub is_correct: bool,
    pub correct_text: Option<String>,
    pub marks: [OptionMark; 4],
    pub cue: FeedbackCue,
}

impl FeedbackView {
    #[must_use]
    pub fn new(selected: OptionLabel, entry: &QuestionEntry) -> Self {
        let is_correct = entry.is_correct(selected);
        let correct = entry.answer();
        let marks = OptionLabel::ALL.map(|label| {
            if label == selected {
                if is_correct {
                    OptionMark::Correct
                } else {
                    OptionMark::Incorrect
                }
            } else if Some(label) == correct {
                OptionMark::Correct
            } else {
                OptionMark::Neutral
            }
        });

        Self {
            selected,
            correct,
            is_correct,
            correct_text: entry.correct_option_text().map(str::to_string),
            marks,
            cue: if is_correct {
                FeedbackCue::Correct
            } else {
                FeedbackCue::Wrong
            },
        }
    }

    #[must_use]
    pub fn mark(&self, label: OptionLabel) -> OptionMark {
        self.marks[label.index()]
    }

    #[must_use]
    pub fn message(&self) -> String {
        if self.is_correct {
            return "Correct!".to_string();
        }
        match (self.correct, self.correct_text.as_deref()) {
            (Some(label), Some(text)) => format!("Wrong! The correct answer is {label}: {text}"),
            _ => "Wrong!".to_string(),
        }
    }
}

//
// ─── FINISHED ─────────────────────────────────────────────────────────────────
//

/// Payload for entering `Finished`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinishedView {
    pub correct: usize,
    pub wrong: usize,
    pub total: usize,
    pub tier: ScoreTier,
    pub can_retry: bool,
}

impl FinishedView {
    #[must_use]
    pub fn from_summary(summary: &QuizSummary) -> Self {
        Self {
            correct: summary.correct(),
            wrong: summary.wrong(),
            total: summary.total(),
            tier: summary.tier(),
            can_retry: true,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "You got {} right and {} wrong.\n{}",
            self.correct,
            self.wrong,
            self.tier.message()
        )
    }
}

/// Result of `advance`: the next question or the final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextStateView {
    Question(QuestionView),
    Finished(FinishedView),
}
