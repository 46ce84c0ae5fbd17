use chrono::{DateTime, Utc};
use quiz_core::model::{Category, OptionKey, Question, QuizKind};
use services::{
    FinishReason, LoadFailure, QuizController, QuizResults, QuizScreen, QuizSession, ReviewEntry,
};

use super::time_fmt::format_countdown;

/// Everything the presenter needs to draw the single visible screen.
#[derive(Clone, Debug, PartialEq)]
pub enum ScreenVm {
    Categories(CategoriesVm),
    Question(QuestionVm),
    Results(ResultsVm),
    Review(ReviewVm),
    Notice(NoticeVm),
}

// ─── CATEGORY PICKER ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoriesVm {
    pub categories: Vec<CategoryItemVm>,
    pub controls_enabled: bool,
    pub loading: bool,
    pub load_failure: Option<LoadFailureVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryItemVm {
    pub category: Category,
    pub label: &'static str,
    pub question_count: Option<usize>,
}

impl CategoryItemVm {
    #[must_use]
    pub fn count_label(&self) -> Option<String> {
        self.question_count.map(|count| match count {
            1 => "1 question".to_string(),
            n => format!("{n} questions"),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadFailureVm {
    pub title: &'static str,
    pub guidance: &'static str,
    pub detail: String,
}

impl From<&LoadFailure> for LoadFailureVm {
    fn from(failure: &LoadFailure) -> Self {
        Self {
            title: LoadFailure::TITLE,
            guidance: LoadFailure::GUIDANCE,
            detail: failure.detail.clone(),
        }
    }
}

// ─── QUESTION ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub title: &'static str,
    pub position: usize,
    pub total: usize,
    pub progress_percent: f64,
    pub countdown: Option<String>,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub can_advance: bool,
}

impl QuestionVm {
    #[must_use]
    pub fn counter_label(&self) -> String {
        format!("{} of {}", self.position, self.total)
    }

    #[must_use]
    pub fn number_label(&self) -> String {
        format!("Question {}", self.position)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: OptionKey,
    pub label: String,
    pub state: OptionState,
}

/// How an option button looks. Every state but `Open` is disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Open,
    Locked,
    Correct,
    Incorrect,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Open | OptionState::Locked => "option-btn",
            OptionState::Correct => "option-btn correct",
            OptionState::Incorrect => "option-btn incorrect",
        }
    }

    #[must_use]
    pub fn is_disabled(self) -> bool {
        self != OptionState::Open
    }
}

fn option_state(key: &OptionKey, correct: &OptionKey, picked: Option<&OptionKey>) -> OptionState {
    let Some(picked) = picked else {
        return OptionState::Open;
    };
    if key == correct {
        OptionState::Correct
    } else if key == picked {
        OptionState::Incorrect
    } else {
        OptionState::Locked
    }
}

fn option_label(key: &OptionKey, text: &str) -> String {
    format!("{key}. {text}")
}

// ─── RESULTS ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub title: &'static str,
    pub percent: u32,
    pub passed: bool,
    pub correct: usize,
    pub total: usize,
    pub notes: Vec<String>,
}

impl ResultsVm {
    #[must_use]
    pub fn percent_label(&self) -> String {
        format!("{}%", self.percent)
    }

    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if self.passed { "Passed" } else { "Not Passed" }
    }

    #[must_use]
    pub fn detail(&self) -> String {
        format!("{} of {} correct", self.correct, self.total)
    }
}

fn results_vm(kind: QuizKind, results: &QuizResults) -> ResultsVm {
    let report = results.report;
    let mut notes = Vec::new();
    if results.reason == FinishReason::TimeExpired {
        notes.push("Time expired before the exam was finished.".to_string());
    }
    if report.skipped > 0 {
        notes.push(format!("{} not answered, counted as incorrect.", report.skipped));
    }
    ResultsVm {
        title: kind.label(),
        percent: report.percent,
        passed: report.passed,
        correct: report.correct,
        total: report.total,
        notes,
    }
}

// ─── REVIEW ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub items: Vec<ReviewItemVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub number_label: String,
    pub is_correct: bool,
    pub prompt: String,
    pub your_answer: String,
    /// Shown only when the pick was wrong or missing.
    pub correct_answer: Option<String>,
    pub explanation: String,
}

impl ReviewItemVm {
    pub const NO_ANSWER: &'static str = "Did not answer";

    #[must_use]
    pub fn badge(&self) -> &'static str {
        if self.is_correct { "Correct" } else { "Incorrect" }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.is_correct {
            "review-item review-item--correct"
        } else {
            "review-item review-item--incorrect"
        }
    }
}

impl From<&ReviewEntry> for ReviewItemVm {
    fn from(entry: &ReviewEntry) -> Self {
        let your_answer = entry.picked.as_ref().map_or_else(
            || Self::NO_ANSWER.to_string(),
            |(key, text)| option_label(key, text),
        );
        let correct_answer =
            (!entry.is_correct).then(|| option_label(&entry.correct.0, &entry.correct.1));
        Self {
            number_label: format!("Q{}", entry.number),
            is_correct: entry.is_correct,
            prompt: entry.prompt.clone(),
            your_answer,
            correct_answer,
            explanation: entry.explanation.clone(),
        }
    }
}

// ─── NOTICE ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeVm {
    pub title: &'static str,
    pub message: String,
}

// ─── MAPPING ─────────────────────────────────────────────────────────────────

/// Map the controller snapshot onto the screen to draw.
///
/// `now` only feeds the mock-exam countdown.
#[must_use]
pub fn map_screen(controller: &QuizController, now: DateTime<Utc>) -> ScreenVm {
    match controller.screen() {
        QuizScreen::Idle | QuizScreen::CategorySelection => {
            ScreenVm::Categories(categories_vm(controller))
        }
        QuizScreen::InProgress => controller
            .session()
            .and_then(|session| question_vm(session, now))
            .map_or_else(
                || ScreenVm::Categories(categories_vm(controller)),
                ScreenVm::Question,
            ),
        QuizScreen::Finished => match (controller.session(), controller.results()) {
            (Some(session), Some(results)) => {
                ScreenVm::Results(results_vm(session.kind(), &results))
            }
            _ => ScreenVm::Categories(categories_vm(controller)),
        },
        QuizScreen::Reviewing => controller.review().map_or_else(
            || ScreenVm::Categories(categories_vm(controller)),
            |entries| {
                ScreenVm::Review(ReviewVm {
                    items: entries.iter().map(ReviewItemVm::from).collect(),
                })
            },
        ),
        QuizScreen::Notice(notice) => ScreenVm::Notice(NoticeVm {
            title: notice.title(),
            message: notice.message(),
        }),
    }
}

fn categories_vm(controller: &QuizController) -> CategoriesVm {
    let banks = controller.banks();
    let categories = Category::ALL
        .into_iter()
        .map(|category| CategoryItemVm {
            category,
            label: category.label(),
            question_count: banks.map(|banks| banks.bank(category).len()),
        })
        .collect();
    CategoriesVm {
        categories,
        controls_enabled: controller.controls_enabled(),
        loading: *controller.screen() == QuizScreen::Idle,
        load_failure: controller.load_failure().map(LoadFailureVm::from),
    }
}

fn question_vm(session: &QuizSession, now: DateTime<Utc>) -> Option<QuestionVm> {
    let question: &Question = session.current_question()?;
    let progress = session.progress();
    let picked = session
        .current_answer()
        .and_then(|answer| answer.picked.as_ref());
    let options = question
        .options()
        .map(|(key, text)| OptionVm {
            key: key.clone(),
            label: option_label(key, text),
            state: option_state(key, question.correct(), picked),
        })
        .collect();

    Some(QuestionVm {
        title: session.kind().label(),
        position: progress.position,
        total: progress.total,
        progress_percent: progress.percent(),
        countdown: session.remaining_secs(now).map(format_countdown),
        prompt: question.prompt().to_string(),
        options,
        can_advance: session.is_current_answered(),
    })
}
