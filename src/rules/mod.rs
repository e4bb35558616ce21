//! Rename rules and the evaluator contract
//!
//! The batch pipeline never looks inside a [`RuleSet`]; it only checks whether one is
//! configured and hands it to a [`FilterEvaluator`] together with the selected files.
//! [`NameRuleEvaluator`] is the evaluator shipped with the crate: it starts from the
//! file name without extension and runs every rule over it in order.

mod error;
mod types;

pub use error::RuleError;
pub use types::{CaseStyle, Rule, RuleSet};

use regex::Regex;

use crate::collection::FileEntry;

/// Computes one target name per file
///
/// Implementations must return exactly one name per input file, in input order,
/// and must not have side effects on the files.
pub trait FilterEvaluator {
    /// # Errors
    /// Returns `RuleError` if the rules cannot be applied.
    fn evaluate(&self, rules: &RuleSet, files: &[&FileEntry]) -> Result<Vec<String>, RuleError>;
}

/// A rule ready to run, with its regex compiled once per evaluation
enum Step<'a> {
    Plain(&'a Rule),
    Regex(Regex, &'a str),
}

impl Step<'_> {
    fn run(&self, name: &str) -> String {
        match self {
            Self::Regex(re, replacement) => re.replace_all(name, *replacement).into_owned(),
            Self::Plain(rule) => apply_plain(rule, name),
        }
    }
}

fn apply_plain(rule: &Rule, name: &str) -> String {
    match rule {
        Rule::StripExtension => match name.rfind('.') {
            Some(0) | None => name.to_string(),
            Some(idx) => name[..idx].to_string(),
        },
        Rule::Replace { find, with } if !find.is_empty() => name.replace(find.as_str(), with),
        Rule::RemovePrefix { text } => name.strip_prefix(text.as_str()).unwrap_or(name).to_string(),
        Rule::RemoveSuffix { text } => name.strip_suffix(text.as_str()).unwrap_or(name).to_string(),
        Rule::AddPrefix { text } => format!("{text}{name}"),
        Rule::AddSuffix { text } => format!("{name}{text}"),
        Rule::Case { style } => style.convert(name),
        Rule::Trim => name.split_whitespace().collect::<Vec<_>>().join(" "),
        Rule::Replace { .. } | Rule::RegexReplace { .. } => name.to_string(),
    }
}

fn compile(rules: &RuleSet) -> Result<Vec<Step<'_>>, RuleError> {
    rules
        .rules()
        .iter()
        .map(|rule| match rule {
            Rule::RegexReplace {
                pattern,
                replacement,
            } => Regex::new(pattern)
                .map(|re| Step::Regex(re, replacement.as_str()))
                .map_err(|source| RuleError::InvalidRegex {
                    pattern: pattern.clone(),
                    source,
                }),
            other => Ok(Step::Plain(other)),
        })
        .collect()
}

/// Check that every rule in the set can run
///
/// # Errors
/// Returns `RuleError::InvalidRegex` for the first regex that does not compile.
pub fn validate(rules: &RuleSet) -> Result<(), RuleError> {
    compile(rules).map(|_| ())
}

/// Derives a title from the file name, shaped by the rules
#[derive(Debug, Clone, Copy, Default)]
pub struct NameRuleEvaluator;

impl NameRuleEvaluator {
    /// Run the rules over a single base name
    ///
    /// # Errors
    /// Returns `RuleError` if a regex rule does not compile.
    pub fn evaluate_name(rules: &RuleSet, base: &str) -> Result<String, RuleError> {
        let steps = compile(rules)?;
        Ok(run_steps(&steps, base))
    }
}

fn run_steps(steps: &[Step<'_>], base: &str) -> String {
    steps
        .iter()
        .fold(base.to_string(), |name, step| step.run(&name))
}

impl FilterEvaluator for NameRuleEvaluator {
    fn evaluate(&self, rules: &RuleSet, files: &[&FileEntry]) -> Result<Vec<String>, RuleError> {
        let steps = compile(rules)?;
        Ok(files
            .iter()
            .map(|entry| run_steps(&steps, entry.stem()))
            .collect())
    }
}
