//! Rename rule data structures
//!
//! A [`Rule`] is one step of a name transformation. A [`RuleSet`] is the ordered list
//! of steps the evaluator runs over every file's base name.

use std::fmt;

use heck::{ToKebabCase, ToSnakeCase};
use serde::{Deserialize, Serialize};

/// Letter-case conversions available to [`Rule::Case`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    Lower,
    Upper,
    /// Capitalize the first letter of every whitespace-separated word
    Title,
    Snake,
    Kebab,
}

impl CaseStyle {
    #[must_use]
    pub fn convert(self, name: &str) -> String {
        match self {
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
            Self::Title => title_case(name),
            Self::Snake => name.to_snake_case(),
            Self::Kebab => name.to_kebab_case(),
        }
    }
}

fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// One transformation step applied to a file's base name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Drop one more extension (the base name already lacks the last one)
    StripExtension,
    /// Literal replacement of every occurrence
    Replace { find: String, with: String },
    /// Regex replacement; `$1` style references in `replacement` are expanded
    RegexReplace { pattern: String, replacement: String },
    RemovePrefix { text: String },
    RemoveSuffix { text: String },
    AddPrefix { text: String },
    AddSuffix { text: String },
    Case { style: CaseStyle },
    /// Trim ends and collapse inner whitespace runs to one space
    Trim,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StripExtension => write!(f, "strip extension"),
            Self::Replace { find, with } => write!(f, "replace '{find}' with '{with}'"),
            Self::RegexReplace {
                pattern,
                replacement,
            } => write!(f, "regex '{pattern}' -> '{replacement}'"),
            Self::RemovePrefix { text } => write!(f, "remove prefix '{text}'"),
            Self::RemoveSuffix { text } => write!(f, "remove suffix '{text}'"),
            Self::AddPrefix { text } => write!(f, "add prefix '{text}'"),
            Self::AddSuffix { text } => write!(f, "add suffix '{text}'"),
            Self::Case { style } => write!(f, "{style:?} case"),
            Self::Trim => write!(f, "trim whitespace"),
        }
    }
}

/// Ordered list of rules; empty means "no rules configured"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Append the rules of `other` that are not already present, keeping their order
    pub fn merge(&mut self, other: &Self) {
        for rule in &other.rules {
            if !self.rules.contains(rule) {
                self.rules.push(rule.clone());
            }
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl Extend<Rule> for RuleSet {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
