use serde::Serialize;
use std::fmt;

/// Where a quiz stands between host events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    /// No session has been started.
    Idle,
    /// A question is displayed and its options accept a selection.
    Showing,
    /// An option is locked in and feedback is displayed.
    Answered,
    /// Every question is answered and the score is displayed.
    Finished,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizPhase::Idle => "idle",
            QuizPhase::Showing => "showing a question",
            QuizPhase::Answered => "showing feedback",
            QuizPhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Host-initiated operations, named in transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizAction {
    Start,
    Select,
    Advance,
    Restart,
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizAction::Start => "start",
            QuizAction::Select => "select an option",
            QuizAction::Advance => "advance",
            QuizAction::Restart => "restart",
        };
        f.write_str(name)
    }
}
