use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionBanks, QuizKind, QuizSettings};

use crate::error::EmptyBankError;

/// Questions selected for a new session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub kind: QuizKind,
    pub questions: Vec<Question>,
    /// Size of the pool the questions were drawn from.
    pub pool_size: usize,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

/// Shuffle `pool` and keep the first `limit` questions.
///
/// `shuffle` is Fisher–Yates: from the last index down to 1, swap with a
/// uniformly chosen index in `[0, i]`. The result never repeats a question.
pub fn sample_questions<R: Rng + ?Sized>(
    mut pool: Vec<Question>,
    limit: usize,
    rng: &mut R,
) -> Vec<Question> {
    pool.shuffle(rng);
    pool.truncate(limit);
    pool
}

/// Build the question set for `kind` from the loaded banks.
///
/// Category quizzes draw from that category's bank; the mock exam draws from
/// every bank concatenated in the fixed category order.
///
/// # Errors
///
/// Returns `EmptyBankError` when the pool for `kind` has no questions.
pub fn plan_session<R: Rng + ?Sized>(
    kind: QuizKind,
    banks: &QuestionBanks,
    settings: &QuizSettings,
    rng: &mut R,
) -> Result<SessionPlan, EmptyBankError> {
    let (pool, limit) = match kind {
        QuizKind::Category(category) => {
            let bank = banks.bank(category);
            if bank.is_empty() {
                return Err(EmptyBankError::Category(category));
            }
            (bank.questions().to_vec(), settings.category_quiz_size())
        }
        QuizKind::MockExam => {
            let pool = banks.combined_pool();
            if pool.is_empty() {
                return Err(EmptyBankError::Pool);
            }
            (pool, settings.mock_exam_size())
        }
    };

    let pool_size = pool.len();
    Ok(SessionPlan {
        kind,
        questions: sample_questions(pool, limit, rng),
        pool_size,
    })
}
