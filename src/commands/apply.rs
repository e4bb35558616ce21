//! Apply command: write rule-derived titles into the checked files

use colored::Colorize;
use dialoguer::Confirm;
use tracing::warn;

use super::collect_files;
use crate::cli::RuleArgs;
use crate::collection::FileCollection;
use crate::config::AppConfig;
use crate::pipeline::{BatchApplyPipeline, FailurePolicy, TagWriteResult};
use crate::report::ErrorReporter;
use crate::rules::{self, FilterEvaluator, NameRuleEvaluator, RuleSet};
use crate::tags::{Id3TagWriter, TagWriter};
use crate::{MetaRenameError, Result};

/// Execute the apply command
///
/// # Errors
/// Returns an error if a rule is invalid, the batch cannot start, the prompt fails,
/// or any file could not be written.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &AppConfig,
    files: &[String],
    uncheck: &[String],
    rule_args: &RuleArgs,
    continue_on_error: bool,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let reporter = ErrorReporter::default();
    let mut collection = collect_files(files, &reporter, config.surface_errors);
    uncheck_paths(&mut collection, uncheck);

    let rules = rule_args.resolve(&config.rules);
    rules::validate(&rules)?;

    let policy = if continue_on_error {
        FailurePolicy::ContinueOnError
    } else {
        config.failure_policy
    };
    let pipeline = BatchApplyPipeline::new(NameRuleEvaluator, Id3TagWriter, reporter).with_policy(policy);

    if !rules.is_empty() && !collection.selected().is_empty() {
        if !quiet {
            print_selection(&rules, &collection);
        }
        if !yes && !confirm(collection.selected().len())? {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let result = run(&pipeline, &rules, &mut collection)?;
    if !quiet {
        print_summary(&result);
    }

    let failed = result.failures().count();
    if failed > 0 {
        return Err(MetaRenameError::WriteFailures { failed });
    }
    Ok(())
}

/// Run one batch; an empty rule set counts as "no rules configured"
pub(crate) fn run<E: FilterEvaluator, W: TagWriter>(
    pipeline: &BatchApplyPipeline<E, W>,
    rules: &RuleSet,
    collection: &mut FileCollection,
) -> Result<TagWriteResult> {
    Ok(pipeline.apply(Some(rules), collection)?)
}

fn uncheck_paths(collection: &mut FileCollection, uncheck: &[String]) {
    for path in uncheck {
        if !collection.set_checked(path, false) {
            warn!(path = %path, "cannot uncheck a file that is not in the list");
        }
    }
}

fn confirm(count: usize) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Write titles to {count} file(s)?"))
        .default(false)
        .interact()
        .map_err(|e| MetaRenameError::InvalidInput(format!("Failed to get confirmation: {e}")))
}

fn print_selection(rules: &RuleSet, collection: &FileCollection) {
    let selected = collection.selected();

    println!("{}", "Rules:".bold());
    for rule in rules.rules() {
        println!("  - {rule}");
    }
    println!("\n{}", "Selected files:".bold());
    for entry in &selected {
        println!("  {} {}", "•".cyan(), entry.name());
    }
    let unchecked = collection.len() - selected.len();
    if unchecked > 0 {
        println!("  {} {unchecked} unchecked", "⊘".yellow());
    }
    println!();
}

fn print_summary(result: &TagWriteResult) {
    println!("\n{}", "=== Apply Summary ===".bold());
    println!("  {} {}", "✓ Written:".green(), result.processed_count);
    if result.not_attempted > 0 {
        println!("  {} {}", "⊘ Not attempted:".yellow(), result.not_attempted);
    }
    let failed = result.failures().count();
    if failed > 0 {
        println!("  {} {}", "✗ Errors:".red(), failed);
        println!("\n{}", "Error details:".red().bold());
        for error in result.failures() {
            println!("  - {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ApplyError;
    use crate::rules::Rule;
    use crate::testing::{RecordingWriter, TestDir};

    #[test]
    fn test_unchecked_paths_are_skipped() {
        let dir = TestDir::new();
        let mut collection = dir.collection(&["keep.mp3", "skip.mp3"]);
        let skip = dir.path().join("skip.mp3").display().to_string();
        uncheck_paths(&mut collection, &[skip, "not-listed.mp3".to_string()]);

        let pipeline =
            BatchApplyPipeline::new(NameRuleEvaluator, RecordingWriter::new(), ErrorReporter::silent());
        let rules = RuleSet::from(vec![Rule::AddSuffix { text: "!".into() }]);
        let result = run(&pipeline, &rules, &mut collection).unwrap();

        assert_eq!(result.processed_count, 1);
        let written = pipeline.writer().written();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].1, "keep!");
    }

    #[test]
    fn test_empty_rules_are_rejected() {
        let dir = TestDir::new();
        let mut collection = dir.collection(&["a.mp3"]);
        let pipeline =
            BatchApplyPipeline::new(NameRuleEvaluator, RecordingWriter::new(), ErrorReporter::silent());

        let err = run(&pipeline, &RuleSet::new(), &mut collection).unwrap_err();
        assert!(matches!(
            err,
            MetaRenameError::Apply(ApplyError::NoRulesConfigured)
        ));
    }
}
