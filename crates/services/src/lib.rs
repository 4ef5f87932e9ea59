#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;
pub mod remote_source;

pub use quiz_core::Clock;

pub use error::QuizError;
pub use quiz::{
    AnswerRecord, CueSink, FeedbackCue, FeedbackView, FinishedView, NextStateView, NoopCues,
    OptionMark, OptionView, QuestionView, QuizAction, QuizEngine, QuizEvent, QuizPhase,
    QuizRender, QuizSession, SessionProgress, load_bank, load_engine,
};
pub use remote_source::HttpQuestionSource;
