use serde::{Deserialize, Serialize};

use crate::model::label::OptionLabel;

/// One multiple-choice question with exactly four options.
///
/// `answer` is `None` when the source answer line could not be read. Such an
/// entry is still playable, but no selection ever counts as correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionEntry {
    prompt: String,
    options: [String; 4],
    answer: Option<OptionLabel>,
}

impl QuestionEntry {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        options: [String; 4],
        answer: Option<OptionLabel>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            answer,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    /// The correct label, or `None` for an entry without a valid answer.
    #[must_use]
    pub fn answer(&self) -> Option<OptionLabel> {
        self.answer
    }

    #[must_use]
    pub fn has_valid_answer(&self) -> bool {
        self.answer.is_some()
    }

    #[must_use]
    pub fn is_correct(&self, selected: OptionLabel) -> bool {
        self.answer == Some(selected)
    }

    #[must_use]
    pub fn correct_option_text(&self) -> Option<&str> {
        self.answer.map(|label| self.option(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(answer: Option<OptionLabel>) -> QuestionEntry {
        QuestionEntry::new(
            "Largest planet?",
            [
                "Mars".to_string(),
                "Jupiter".to_string(),
                "Venus".to_string(),
                "Earth".to_string(),
            ],
            answer,
        )
    }

    #[test]
    fn correct_label_matches_only_itself() {
        let q = entry(Some(OptionLabel::B));
        assert!(q.is_correct(OptionLabel::B));
        assert!(!q.is_correct(OptionLabel::A));
        assert_eq!(q.correct_option_text(), Some("Jupiter"));
    }

    #[test]
    fn sentinel_never_matches() {
        let q = entry(None);
        assert!(!q.has_valid_answer());
        for label in OptionLabel::ALL {
            assert!(!q.is_correct(label));
        }
        assert_eq!(q.correct_option_text(), None);
    }
}
