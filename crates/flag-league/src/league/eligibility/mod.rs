mod identifier;
mod roster;
mod rules;

pub use identifier::{age_on, parse_identifier, IdentifierError, ParsedIdentifier, SexCode};
pub use roster::{
    check_batch, check_registration, RegistrationRefusal, RegistrationRequest,
    RegistrationVerdict, TeamCategoryIndex,
};
pub use rules::{CategoryRule, CategoryRuleBook};

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::CategoryCode;

/// Why a player may not join a category. First applicable reason wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefusalReason {
    #[error("unknown category {category}")]
    UnknownCategory { category: String },
    #[error("unparseable identifier: {detail}")]
    UnparseableIdentifier { detail: String },
    #[error("{category} does not admit {sex} players")]
    SexNotPermitted { category: CategoryCode, sex: String },
    #[error("age {age} is below the {category} minimum of {min_age}")]
    BelowMinimumAge {
        category: CategoryCode,
        age: i32,
        min_age: u8,
    },
    #[error("age {age} is above the {category} maximum of {max_age}")]
    AboveMaximumAge {
        category: CategoryCode,
        age: i32,
        max_age: u8,
    },
}

/// Structured answer to "may this player join this category?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityVerdict {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RefusalReason>,
}

impl EligibilityVerdict {
    fn allowed(age: i32) -> Self {
        Self {
            allowed: true,
            age: Some(age),
            reason: None,
        }
    }

    fn refused(age: Option<i32>, reason: RefusalReason) -> Self {
        Self {
            allowed: false,
            age,
            reason: Some(reason),
        }
    }

    pub fn summary(&self) -> String {
        match &self.reason {
            None => "eligible".to_string(),
            Some(reason) => reason.to_string(),
        }
    }
}

/// Stateless evaluator applying the injected rule book to a document.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    rules: CategoryRuleBook,
}

impl EligibilityEngine {
    pub fn new(rules: CategoryRuleBook) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CategoryRuleBook {
        &self.rules
    }

    /// Check a category given as a raw code, as received from callers.
    pub fn can_join_code(&self, document: &str, category: &str, today: NaiveDate) -> EligibilityVerdict {
        match category.parse::<CategoryCode>() {
            Ok(code) => self.can_join_category(document, code, today),
            Err(_) => EligibilityVerdict::refused(
                None,
                RefusalReason::UnknownCategory {
                    category: category.to_string(),
                },
            ),
        }
    }

    pub fn can_join_category(
        &self,
        document: &str,
        category: CategoryCode,
        today: NaiveDate,
    ) -> EligibilityVerdict {
        let Some(rule) = self.rules.rule(category) else {
            return EligibilityVerdict::refused(
                None,
                RefusalReason::UnknownCategory {
                    category: category.code().to_string(),
                },
            );
        };

        let parsed = match parse_identifier(document) {
            Ok(parsed) => parsed,
            Err(err) => {
                return EligibilityVerdict::refused(
                    None,
                    RefusalReason::UnparseableIdentifier {
                        detail: err.to_string(),
                    },
                )
            }
        };
        let birth = match parsed.birth_date(today) {
            Ok(birth) => birth,
            Err(err) => {
                return EligibilityVerdict::refused(
                    None,
                    RefusalReason::UnparseableIdentifier {
                        detail: err.to_string(),
                    },
                )
            }
        };
        let age = age_on(birth, today);

        match parsed.sex.sex() {
            Some(sex) if rule.permits(sex) => {}
            _ => {
                return EligibilityVerdict::refused(
                    Some(age),
                    RefusalReason::SexNotPermitted {
                        category,
                        sex: describe_sex(parsed.sex),
                    },
                )
            }
        }

        if age < i32::from(rule.min_age) {
            return EligibilityVerdict::refused(
                Some(age),
                RefusalReason::BelowMinimumAge {
                    category,
                    age,
                    min_age: rule.min_age,
                },
            );
        }

        if let Some(max_age) = rule.max_age {
            if age > i32::from(max_age) {
                return EligibilityVerdict::refused(
                    Some(age),
                    RefusalReason::AboveMaximumAge {
                        category,
                        age,
                        max_age,
                    },
                );
            }
        }

        EligibilityVerdict::allowed(age)
    }
}

fn describe_sex(code: SexCode) -> String {
    match code {
        SexCode::Known(sex) => sex.label().to_string(),
        SexCode::Indeterminate(c) => format!("indeterminate ('{c}')"),
    }
}
