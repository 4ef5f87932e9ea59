mod cues;
mod engine;
mod loader;
mod phase;
mod progress;
mod session;
mod view;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use cues::{CueSink, NoopCues};
pub use engine::{QuizEngine, QuizEvent, QuizRender};
pub use loader::{load_bank, load_engine};
pub use phase::{QuizAction, QuizPhase};
pub use progress::SessionProgress;
pub use session::{AnswerRecord, QuizSession};
pub use view::{
    FeedbackCue, FeedbackView, FinishedView, NextStateView, OptionMark, OptionView, QuestionView,
};
