use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::Clock;
use quiz_core::model::{Category, QuizSettings};
use services::QuestionBankService;
use storage::json::JsonDirSource;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::{App, UiApp, build_app_context};

/// Desktop practice quiz for the security guard licence exam.
#[derive(Parser, Debug)]
#[command(name = "guard-quiz", version, about, long_about = None)]
struct Cli {
    /// Directory holding one `<category>.json` bank per category
    #[arg(long, env = "QUIZ_QUESTIONS_DIR", default_value = "questions")]
    questions_dir: PathBuf,

    /// Questions drawn for a mock exam
    #[arg(long, env = "QUIZ_MOCK_SIZE", default_value_t = QuizSettings::DEFAULT_MOCK_SIZE)]
    mock_size: usize,

    /// Questions drawn for a category quiz
    #[arg(long, env = "QUIZ_CATEGORY_SIZE", default_value_t = QuizSettings::DEFAULT_QUIZ_SIZE)]
    quiz_size: usize,

    /// Mock exam time limit in seconds
    #[arg(
        long,
        env = "QUIZ_TIME_LIMIT_SECS",
        default_value_t = QuizSettings::DEFAULT_TIME_LIMIT_SECS
    )]
    time_limit: u64,

    /// Score needed to pass, in percent
    #[arg(
        long,
        env = "QUIZ_PASSING_PERCENT",
        default_value_t = QuizSettings::DEFAULT_PASSING_PERCENT
    )]
    passing_percent: u32,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Result<QuizSettings> {
        QuizSettings::new(
            self.quiz_size,
            self.mock_size,
            self.time_limit,
            self.passing_percent,
        )
        .context("invalid quiz settings")
    }
}

struct DesktopApp {
    question_banks: Arc<QuestionBankService>,
    settings: QuizSettings,
}

impl UiApp for DesktopApp {
    fn question_banks(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_banks)
    }

    fn quiz_settings(&self) -> QuizSettings {
        self.settings
    }

    fn clock(&self) -> Clock {
        Clock::system()
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;

    let source = Arc::new(JsonDirSource::new(cli.questions_dir));
    if !source.root().is_dir() {
        warn!(
            dir = %source.root().display(),
            "questions directory not found; quizzes will stay disabled"
        );
    }
    info!(
        dir = %source.root().display(),
        banks = Category::ALL.len(),
        mock_size = settings.mock_exam_size(),
        quiz_size = settings.category_quiz_size(),
        time_limit_secs = settings.mock_time_limit_secs(),
        passing_percent = settings.passing_percent(),
        "starting quiz"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        question_banks: Arc::new(QuestionBankService::new(source)),
        settings,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Guard Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_exam_rules() {
        let cli = Cli::try_parse_from(["guard-quiz"]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(cli.questions_dir, PathBuf::from("questions"));
        assert_eq!(settings, QuizSettings::default());
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::try_parse_from([
            "guard-quiz",
            "--questions-dir",
            "/tmp/banks",
            "--mock-size",
            "100",
            "--time-limit",
            "1800",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.mock_exam_size(), 100);
        assert_eq!(settings.mock_time_limit_secs(), 1800);
        assert_eq!(cli.questions_dir, PathBuf::from("/tmp/banks"));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let cli = Cli::try_parse_from(["guard-quiz", "--passing-percent", "0"]).unwrap();
        assert!(cli.settings().is_err());
        assert!(Cli::try_parse_from(["guard-quiz", "--mock-size", "many"]).is_err());
    }
}
