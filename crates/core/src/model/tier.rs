use serde::{Deserialize, Serialize};

/// Feedback category for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Perfect,
    Encouragement,
    AlmostPerfect,
    Great,
    Good,
    KeepPracticing,
}

impl ScoreTier {
    /// Pick the tier for a score. First match wins:
    ///
    /// 1. every answer correct
    /// 2. no answer correct
    /// 3. exactly one mistake
    /// 4. at least 80% correct
    /// 5. at least 50% correct
    /// 6. anything else
    #[must_use]
    pub fn from_score(correct: usize, wrong: usize, total: usize) -> Self {
        if correct == total {
            Self::Perfect
        } else if correct == 0 {
            Self::Encouragement
        } else if correct + 1 == total && wrong == 1 {
            Self::AlmostPerfect
        } else if correct * 5 >= total * 4 {
            Self::Great
        } else if correct * 2 >= total {
            Self::Good
        } else {
            Self::KeepPracticing
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect! You answered all questions correctly! Fantastic job!",
            Self::Encouragement => "Don't give up! Try again and you will improve!",
            Self::AlmostPerfect => "Almost perfect! Just one mistake, great work!",
            Self::Great => "Great job! You're doing really well!",
            Self::Good => "Good effort! Keep practicing and you'll get better!",
            Self::KeepPracticing => "Keep practicing! Every mistake is a chance to learn!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_question_tiers() {
        assert_eq!(ScoreTier::from_score(5, 0, 5), ScoreTier::Perfect);
        assert_eq!(ScoreTier::from_score(4, 1, 5), ScoreTier::AlmostPerfect);
        assert_eq!(ScoreTier::from_score(3, 2, 5), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(2, 3, 5), ScoreTier::KeepPracticing);
        assert_eq!(ScoreTier::from_score(1, 4, 5), ScoreTier::KeepPracticing);
        assert_eq!(ScoreTier::from_score(0, 5, 5), ScoreTier::Encouragement);
    }

    #[test]
    fn perfect_wins_over_other_checks() {
        // A one-question session: 1/1 would also satisfy the other thresholds.
        assert_eq!(ScoreTier::from_score(1, 0, 1), ScoreTier::Perfect);
        assert_eq!(ScoreTier::from_score(0, 1, 1), ScoreTier::Encouragement);
    }

    #[test]
    fn thresholds_on_larger_sessions() {
        assert_eq!(ScoreTier::from_score(9, 1, 10), ScoreTier::AlmostPerfect);
        assert_eq!(ScoreTier::from_score(8, 2, 10), ScoreTier::Great);
        assert_eq!(ScoreTier::from_score(7, 3, 10), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(5, 5, 10), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(4, 6, 10), ScoreTier::KeepPracticing);
    }

    #[test]
    fn two_question_session_with_one_mistake() {
        assert_eq!(ScoreTier::from_score(1, 1, 2), ScoreTier::AlmostPerfect);
    }

    #[test]
    fn messages_are_distinct() {
        let tiers = [
            ScoreTier::Perfect,
            ScoreTier::Encouragement,
            ScoreTier::AlmostPerfect,
            ScoreTier::Great,
            ScoreTier::Good,
            ScoreTier::KeepPracticing,
        ];
        let messages: std::collections::HashSet<_> = tiers.iter().map(|t| t.message()).collect();
        assert_eq!(messages.len(), tiers.len());
    }
}
