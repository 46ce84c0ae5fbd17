use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// One of the fixed question-bank categories.
///
/// Declaration order is the fixed category order used for listing and for
/// building the mock-exam pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RoleOfSecurityGuard,
    LegalPowersLimitations,
    EmergencySituations,
    CommunicationsPublicRelations,
    AccessControl,
    EthicsConduct,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::RoleOfSecurityGuard,
        Category::LegalPowersLimitations,
        Category::EmergencySituations,
        Category::CommunicationsPublicRelations,
        Category::AccessControl,
        Category::EthicsConduct,
    ];

    /// Stable identifier, also the bank file stem.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Category::RoleOfSecurityGuard => "role_of_security_guard",
            Category::LegalPowersLimitations => "legal_powers_limitations",
            Category::EmergencySituations => "emergency_situations",
            Category::CommunicationsPublicRelations => "communications_public_relations",
            Category::AccessControl => "access_control",
            Category::EthicsConduct => "ethics_conduct",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::RoleOfSecurityGuard => "Role of Security Guard",
            Category::LegalPowersLimitations => "Legal Powers & Limitations",
            Category::EmergencySituations => "Emergency Situations",
            Category::CommunicationsPublicRelations => "Communications & Public Relations",
            Category::AccessControl => "Access Control",
            Category::EthicsConduct => "Ethics & Conduct",
        }
    }

    /// File name of this category's bank, e.g. `ethics_conduct.json`.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.json", self.id())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.id() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// What a quiz session draws from: a single category, or the mock exam that
/// pools every category and runs against the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizKind {
    Category(Category),
    MockExam,
}

impl QuizKind {
    pub const MOCK_ID: &'static str = "mock";

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            QuizKind::Category(category) => category.id(),
            QuizKind::MockExam => Self::MOCK_ID,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            QuizKind::Category(category) => category.label(),
            QuizKind::MockExam => "Mock Exam",
        }
    }

    #[must_use]
    pub const fn is_mock(self) -> bool {
        matches!(self, QuizKind::MockExam)
    }
}

impl From<Category> for QuizKind {
    fn from(category: Category) -> Self {
        QuizKind::Category(category)
    }
}
