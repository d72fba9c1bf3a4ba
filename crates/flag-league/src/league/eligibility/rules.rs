use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::super::domain::{CategoryCode, Sex};

/// Age and sex restrictions for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub permitted_sexes: Vec<Sex>,
    pub min_age: u8,
    #[serde(default)]
    pub max_age: Option<u8>,
}

impl CategoryRule {
    fn new(label: &str, permitted_sexes: &[Sex], min_age: u8, max_age: Option<u8>) -> Self {
        Self {
            label: label.to_string(),
            permitted_sexes: permitted_sexes.to_vec(),
            min_age,
            max_age,
        }
    }

    pub fn permits(&self, sex: Sex) -> bool {
        self.permitted_sexes.contains(&sex)
    }
}

/// The single table of category labels and eligibility rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRuleBook {
    rules: BTreeMap<CategoryCode, CategoryRule>,
}

const BOTH: [Sex; 2] = [Sex::Male, Sex::Female];
const MALE: [Sex; 1] = [Sex::Male];
const FEMALE: [Sex; 1] = [Sex::Female];

impl CategoryRuleBook {
    pub fn new(rules: BTreeMap<CategoryCode, CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        let rules = [
            (CategoryCode::Mixgold, CategoryRule::new("Mixto Gold", &BOTH, 18, None)),
            (CategoryCode::Mixsilver, CategoryRule::new("Mixto Silver", &BOTH, 18, None)),
            (CategoryCode::Vargold, CategoryRule::new("Varonil Gold", &MALE, 18, None)),
            (CategoryCode::Varsilver, CategoryRule::new("Varonil Silver", &MALE, 18, None)),
            (CategoryCode::Femgold, CategoryRule::new("Femenil Gold", &FEMALE, 18, None)),
            (CategoryCode::Femsilver, CategoryRule::new("Femenil Silver", &FEMALE, 18, None)),
            (CategoryCode::Varmast, CategoryRule::new("Varonil Master", &MALE, 35, None)),
            (CategoryCode::Femmast, CategoryRule::new("Femenil Master", &FEMALE, 30, None)),
            (CategoryCode::Mixmast, CategoryRule::new("Mixto Master", &BOTH, 35, None)),
            (CategoryCode::Varjuv, CategoryRule::new("Varonil Juvenil", &MALE, 14, Some(17))),
            (CategoryCode::Femjuv, CategoryRule::new("Femenil Juvenil", &FEMALE, 14, Some(17))),
            (CategoryCode::Mixinf, CategoryRule::new("Mixto Infantil", &BOTH, 8, Some(13))),
        ];
        Self::new(rules.into_iter().collect())
    }

    /// Load a rule book from a JSON object keyed by category code.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn rule(&self, code: CategoryCode) -> Option<&CategoryRule> {
        self.rules.get(&code)
    }

    /// Display label, falling back to the raw code when no rule exists.
    pub fn label(&self, code: CategoryCode) -> &str {
        self.rules
            .get(&code)
            .map(|rule| rule.label.as_str())
            .unwrap_or_else(|| code.code())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CategoryRuleBook {
    fn default() -> Self {
        Self::standard()
    }
}
