mod bank;
mod ids;
mod label;
mod question;
mod settings;
mod summary;
mod tier;

pub use bank::{LINES_PER_QUESTION, LoadError, ParseStats, QuestionBank};
pub use ids::SessionId;
pub use label::{LabelError, OptionLabel};
pub use question::QuestionEntry;
pub use settings::{ConfigError, DEFAULT_SESSION_SIZE, QuizSettings};
pub use summary::{QuizSummary, SummaryError};
pub use tier::ScoreTier;
