use thiserror::Error;

use crate::model::label::OptionLabel;
use crate::model::question::QuestionEntry;

/// Non-blank lines consumed per question: prompt, four options, answer.
pub const LINES_PER_QUESTION: usize = 6;

/// Characters stripped from the front of every option line (`"A. "`).
const OPTION_PREFIX_LEN: usize = 3;

/// Character offset of the label on the answer line (`"Answer: B"`).
const ANSWER_LABEL_OFFSET: usize = 8;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that prevent a question bank from becoming available.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("no well-formed questions found")]
    Empty,

    #[error("question source unavailable: {0}")]
    SourceUnavailable(String),
}

//
// ─── PARSE STATS ──────────────────────────────────────────────────────────────
//

/// Counters gathered while segmenting raw bank text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub content_len: usize,
    pub non_blank_lines: usize,
    pub questions: usize,
    pub dropped_lines: usize,
    pub missing_answers: usize,
}

//
// ─── QUESTION BANK ────────────────────────────────────────────────────────────
//

/// Immutable, non-empty collection of questions loaded once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    entries: Vec<QuestionEntry>,
}

impl QuestionBank {
    /// Wrap already-built entries.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Empty` if `entries` is empty.
    pub fn new(entries: Vec<QuestionEntry>) -> Result<Self, LoadError> {
        if entries.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(Self { entries })
    }

    /// Parse the flat text bank format.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Empty` if no complete six-line block is present.
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        let (entries, _) = Self::parse_entries(raw);
        Self::new(entries)
    }

    /// Segment `raw` into questions without enforcing non-emptiness.
    ///
    /// Blank lines are dropped first, then lines are consumed six at a time.
    /// A trailing block with fewer than six lines is ignored. An answer line
    /// whose ninth character is missing or not `A-D` produces an entry with no
    /// valid answer instead of an error.
    #[must_use]
    pub fn parse_entries(raw: &str) -> (Vec<QuestionEntry>, ParseStats) {
        let lines: Vec<&str> = raw
            .split(['\r', '\n'])
            .filter(|line| !line.trim().is_empty())
            .collect();

        let entries: Vec<QuestionEntry> = lines
            .chunks_exact(LINES_PER_QUESTION)
            .map(parse_block)
            .collect();

        let stats = ParseStats {
            content_len: raw.len(),
            non_blank_lines: lines.len(),
            questions: entries.len(),
            dropped_lines: lines.len() % LINES_PER_QUESTION,
            missing_answers: entries.iter().filter(|e| !e.has_valid_answer()).count(),
        };

        (entries, stats)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed bank; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&QuestionEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[QuestionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionEntry> {
        self.entries.iter()
    }
}

fn parse_block(block: &[&str]) -> QuestionEntry {
    let prompt = block[0].trim();
    let options = [
        option_text(block[1]),
        option_text(block[2]),
        option_text(block[3]),
        option_text(block[4]),
    ];
    QuestionEntry::new(prompt, options, answer_label(block[5]))
}

fn option_text(line: &str) -> String {
    line.chars()
        .skip(OPTION_PREFIX_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

fn answer_label(line: &str) -> Option<OptionLabel> {
    line.trim()
        .chars()
        .nth(ANSWER_LABEL_OFFSET)
        .and_then(OptionLabel::from_char)
}
