mod answer;
mod bank;
mod category;
mod ids;
mod question;
mod settings;

pub use answer::AnsweredQuestion;
pub use bank::{QuestionBank, QuestionBanks};
pub use category::{Category, QuizKind, UnknownCategory};
pub use ids::{OptionKey, QuestionId};
pub use question::{Question, QuestionError};
pub use settings::{QuizSettings, SettingsError};
