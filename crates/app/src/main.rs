use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::draw::RandomPicker;
use quiz_core::model::{DEFAULT_SESSION_SIZE, QuizSettings};
use services::{
    CueSink, FeedbackCue, FeedbackView, FinishedView, HttpQuestionSource, OptionMark,
    QuestionView, QuizEngine, QuizEvent, QuizRender, load_engine,
};
use storage::{FileQuestionSource, QuestionSource};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSize { raw: String },
    InvalidSeed { raw: String },
    InvalidLogLevel { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSize { raw } => write!(f, "invalid --size value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidLogLevel { raw } => write!(f, "invalid --log value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path> | --url <url>] [--size <n>] [--seed <u64>]");
    eprintln!("                      [--summary-json] [--log <level>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank Question.txt (a sample bank ships in assets/Question.txt)");
    eprintln!("  --size {DEFAULT_SESSION_SIZE}");
    eprintln!("  --log warn");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK_PATH, QUIZ_BANK_URL, QUIZ_SESSION_SIZE, QUIZ_SEED, QUIZ_LOG");
    eprintln!();
    eprintln!("Controls:");
    eprintln!("  a-d or 1-4  choose an option");
    eprintln!("  n / enter   next question");
    eprintln!("  r           retry after the final score");
    eprintln!("  q           quit");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BankLocation {
    File(PathBuf),
    Url(String),
}

#[derive(Debug)]
struct Args {
    bank: BankLocation,
    session_size: usize,
    seed: Option<u64>,
    summary_json: bool,
    log_level: Level,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut bank = match env("QUIZ_BANK_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => BankLocation::Url(url),
            None => BankLocation::File(
                env("QUIZ_BANK_PATH")
                    .map_or_else(|| PathBuf::from("Question.txt"), PathBuf::from),
            ),
        };
        let mut session_size = match env("QUIZ_SESSION_SIZE") {
            Some(raw) => parse_size(raw)?,
            None => DEFAULT_SESSION_SIZE,
        };
        let mut seed = env("QUIZ_SEED").map(parse_seed).transpose()?;
        let mut log_level = match env("QUIZ_LOG") {
            Some(raw) => parse_level(raw)?,
            None => Level::WARN,
        };
        let mut summary_json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => bank = BankLocation::File(require_value(args, "--bank")?.into()),
                "--url" => bank = BankLocation::Url(require_value(args, "--url")?),
                "--size" => session_size = parse_size(require_value(args, "--size")?)?,
                "--seed" => seed = Some(parse_seed(require_value(args, "--seed")?)?),
                "--log" => log_level = parse_level(require_value(args, "--log")?)?,
                "--summary-json" => summary_json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            bank,
            session_size,
            seed,
            summary_json,
            log_level,
        })
    }
}

fn parse_size(raw: String) -> Result<usize, ArgsError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ArgsError::InvalidSize { raw }),
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw: raw.clone() })
}

fn parse_level(raw: String) -> Result<Level, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidLogLevel { raw: raw.clone() })
}

//
// ─── INPUT ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Event(QuizEvent),
    Help,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim().to_ascii_lowercase();
    let input = match line.as_str() {
        "" | "n" | "next" => Input::Event(QuizEvent::Advance),
        "r" | "retry" => Input::Event(QuizEvent::Restart),
        "q" | "quit" | "exit" => Input::Quit,
        "?" | "h" | "help" => Input::Help,
        "a" | "1" => Input::Event(QuizEvent::Select(0)),
        "b" | "2" => Input::Event(QuizEvent::Select(1)),
        "c" | "3" => Input::Event(QuizEvent::Select(2)),
        "d" | "4" => Input::Event(QuizEvent::Select(3)),
        _ => return None,
    };
    Some(input)
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

/// Rings the terminal bell on a wrong answer.
struct TerminalCues;

impl CueSink for TerminalCues {
    fn cue(&self, cue: FeedbackCue) {
        if cue == FeedbackCue::Wrong {
            print!("\x07");
            let _ = std::io::stdout().flush();
        }
    }
}

fn render_question(view: &QuestionView) {
    println!();
    println!("{} ({}/{})", view.heading(), view.number, view.total);
    for option in &view.options {
        println!("  {}. {}", option.label, option.text);
    }
}

fn render_feedback(view: &FeedbackView) {
    for (label, mark) in quiz_core::model::OptionLabel::ALL.iter().zip(view.marks) {
        let tag = match mark {
            OptionMark::Correct => "[+]",
            OptionMark::Incorrect => "[x]",
            OptionMark::Neutral => "   ",
        };
        println!("  {tag} {label}");
    }
    println!("{}", view.message());
    println!("(press enter for the next question)");
}

fn render_finished(view: &FinishedView) {
    println!();
    println!("Quiz Finished!");
    println!("{}", view.message());
    if view.can_retry {
        println!("(r to retry, q to quit)");
    }
}

fn render(view: &QuizRender) {
    match view {
        QuizRender::Question(view) => render_question(view),
        QuizRender::Feedback(view) => render_feedback(view),
        QuizRender::Finished(view) => render_finished(view),
    }
}

//
// ─── DRIVER ────────────────────────────────────────────────────────────────────
//

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let source: Box<dyn QuestionSource> = match &args.bank {
        BankLocation::File(path) => Box::new(FileQuestionSource::new(path)),
        BankLocation::Url(url) => Box::new(HttpQuestionSource::new(url.as_str())),
    };
    let picker = match args.seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::from_os(),
    };
    let settings = QuizSettings::new(args.session_size)?;

    let mut engine = load_engine(source.as_ref(), settings, picker)
        .await?
        .with_cues(Arc::new(TerminalCues));

    render(&engine.on_event(QuizEvent::Start)?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Some(Input::Quit) => break,
            Some(Input::Help) => print_usage(),
            Some(Input::Event(event)) => match engine.on_event(event) {
                Ok(view) => render(&view),
                Err(err) => eprintln!("{err}"),
            },
            None => eprintln!("unrecognized input: {}", line.trim()),
        }
    }

    finish(&engine, args.summary_json)
}

fn finish(
    engine: &QuizEngine<RandomPicker>,
    summary_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if summary_json {
        println!("{}", serde_json::to_string_pretty(engine.history())?);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(argv: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut iter = argv.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter, |key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_flags() {
        let args = parse(&[], &[]).unwrap();
        assert_eq!(args.bank, BankLocation::File(PathBuf::from("Question.txt")));
        assert_eq!(args.session_size, DEFAULT_SESSION_SIZE);
        assert_eq!(args.seed, None);
        assert_eq!(args.log_level, Level::WARN);
        assert!(!args.summary_json);
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--size", "3", "--bank", "bank.txt", "--seed", "9", "--summary-json"],
            &[("QUIZ_SESSION_SIZE", "7"), ("QUIZ_BANK_URL", "https://example.invalid/q")],
        )
        .unwrap();
        assert_eq!(args.session_size, 3);
        assert_eq!(args.bank, BankLocation::File(PathBuf::from("bank.txt")));
        assert_eq!(args.seed, Some(9));
        assert!(args.summary_json);
    }

    #[test]
    fn environment_url_selects_remote_bank() {
        let args = parse(&[], &[("QUIZ_BANK_URL", "https://example.invalid/q"), ("QUIZ_LOG", "debug")])
            .unwrap();
        assert_eq!(args.bank, BankLocation::Url("https://example.invalid/q".into()));
        assert_eq!(args.log_level, Level::DEBUG);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(parse(&["--size", "0"], &[]), Err(ArgsError::InvalidSize { .. })));
        assert!(matches!(parse(&["--seed", "x"], &[]), Err(ArgsError::InvalidSeed { .. })));
        assert!(matches!(parse(&["--size"], &[]), Err(ArgsError::MissingValue { flag: "--size" })));
        assert!(matches!(parse(&["--bogus"], &[]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn input_maps_to_events() {
        assert_eq!(parse_input("B"), Some(Input::Event(QuizEvent::Select(1))));
        assert_eq!(parse_input("4"), Some(Input::Event(QuizEvent::Select(3))));
        assert_eq!(parse_input(""), Some(Input::Event(QuizEvent::Advance)));
        assert_eq!(parse_input(" r "), Some(Input::Event(QuizEvent::Restart)));
        assert_eq!(parse_input("q"), Some(Input::Quit));
        assert_eq!(parse_input("e"), None);
    }
}
