use std::collections::BTreeMap;

use crate::model::{Category, Question};

/// Ordered, immutable questions of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    category: Category,
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(category: Category, questions: Vec<Question>) -> Self {
        Self {
            category,
            questions,
        }
    }

    #[must_use]
    pub fn empty(category: Category) -> Self {
        Self::new(category, Vec::new())
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Every category's bank, as produced by a successful load.
///
/// Categories that were not supplied are present as empty banks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBanks {
    banks: BTreeMap<Category, QuestionBank>,
}

impl QuestionBanks {
    #[must_use]
    pub fn new(banks: impl IntoIterator<Item = QuestionBank>) -> Self {
        let mut by_category: BTreeMap<Category, QuestionBank> = Category::ALL
            .into_iter()
            .map(|category| (category, QuestionBank::empty(category)))
            .collect();
        for bank in banks {
            by_category.insert(bank.category(), bank);
        }
        Self {
            banks: by_category,
        }
    }

    #[must_use]
    pub fn bank(&self, category: Category) -> &QuestionBank {
        // `new` seeds every category, so the lookup cannot miss.
        &self.banks[&category]
    }

    /// All questions concatenated in the fixed category order.
    #[must_use]
    pub fn combined_pool(&self) -> Vec<Question> {
        Category::ALL
            .into_iter()
            .flat_map(|category| self.bank(category).questions().iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.banks.values().map(QuestionBank::len).sum()
    }
}

impl Default for QuestionBanks {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionKey, QuestionId};

    fn question(category: Category, index: usize) -> Question {
        let options = [("A", "yes"), ("B", "no")]
            .into_iter()
            .map(|(key, text)| (OptionKey::from(key), text.to_string()))
            .collect();
        Question::new(
            QuestionId::new(category, index),
            format!("{category} {index}"),
            options,
            OptionKey::from("A"),
            "",
        )
        .unwrap()
    }

    #[test]
    fn missing_categories_are_empty_banks() {
        let banks = QuestionBanks::new([QuestionBank::new(
            Category::EthicsConduct,
            vec![question(Category::EthicsConduct, 0)],
        )]);

        assert!(banks.bank(Category::AccessControl).is_empty());
        assert_eq!(banks.bank(Category::EthicsConduct).len(), 1);
        assert_eq!(banks.total_questions(), 1);
    }

    #[test]
    fn combined_pool_follows_fixed_category_order() {
        let banks = QuestionBanks::new([
            QuestionBank::new(
                Category::EthicsConduct,
                vec![question(Category::EthicsConduct, 0)],
            ),
            QuestionBank::new(
                Category::RoleOfSecurityGuard,
                vec![
                    question(Category::RoleOfSecurityGuard, 0),
                    question(Category::RoleOfSecurityGuard, 1),
                ],
            ),
        ]);

        let ids: Vec<_> = banks.combined_pool().iter().map(Question::id).collect();
        assert_eq!(
            ids,
            vec![
                QuestionId::new(Category::RoleOfSecurityGuard, 0),
                QuestionId::new(Category::RoleOfSecurityGuard, 1),
                QuestionId::new(Category::EthicsConduct, 0),
            ]
        );
    }
}
