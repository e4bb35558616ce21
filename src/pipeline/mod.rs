//! Batch apply: selection → rule evaluation → tag write → refresh
//!
//! # Failure policy
//!
//! Writes run one at a time in evaluator order. Under the default
//! [`FailurePolicy::AbortOnFirst`] the first failed write ends the batch: files already
//! written keep their new title, the rest are not attempted, and the collection is not
//! refreshed. [`FailurePolicy::ContinueOnError`] attempts every file instead.
//!
//! Precondition failures (no rules, nothing selected) and evaluator failures are
//! returned as [`ApplyError`] before any file is touched.

mod error;

pub use error::ApplyError;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::collection::{FileCollection, FileEntry};
use crate::report::ErrorReporter;
use crate::rules::{FilterEvaluator, RuleSet};
use crate::tags::{TagWriteError, TagWriter};

/// What to do after a tag write fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failure (no rollback)
    #[default]
    AbortOnFirst,
    /// Attempt every file, collecting failures
    ContinueOnError,
}

/// Outcome of one batch apply
#[derive(Debug, Default)]
pub struct TagWriteResult {
    /// True only if every selected file was written
    pub succeeded: bool,
    /// Files written successfully
    pub processed_count: usize,
    /// Path of the first failed write
    pub failed_path: Option<PathBuf>,
    /// Error of the first failed write
    pub error: Option<TagWriteError>,
    /// Failures after the first one (continue-on-error only)
    pub further_failures: Vec<TagWriteError>,
    /// Files left untouched because the batch stopped early
    pub not_attempted: usize,
}

impl TagWriteResult {
    /// Every failure, first one included
    pub fn failures(&self) -> impl Iterator<Item = &TagWriteError> {
        self.error.iter().chain(self.further_failures.iter())
    }

    fn record_failure(&mut self, path: &Path, error: TagWriteError) {
        if self.error.is_none() {
            self.failed_path = Some(path.to_path_buf());
            self.error = Some(error);
        } else {
            self.further_failures.push(error);
        }
    }
}

/// Marks a pipeline busy for the lifetime of one apply
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Orchestrates one batch apply over a [`FileCollection`]
#[derive(Debug)]
pub struct BatchApplyPipeline<E, W> {
    evaluator: E,
    writer: W,
    reporter: ErrorReporter,
    policy: FailurePolicy,
    in_flight: AtomicBool,
}

impl<E: FilterEvaluator, W: TagWriter> BatchApplyPipeline<E, W> {
    pub fn new(evaluator: E, writer: W, reporter: ErrorReporter) -> Self {
        Self {
            evaluator,
            writer,
            reporter,
            policy: FailurePolicy::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    #[must_use]
    pub const fn evaluator(&self) -> &E {
        &self.evaluator
    }

    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Whether an apply is currently running
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Evaluate `rules` over the checked entries and write the resulting titles.
    ///
    /// # Errors
    /// Returns `ApplyError` when a precondition fails, the evaluator fails or breaks
    /// its contract, or another apply is in progress. Tag write failures are not
    /// errors here; they are carried in the returned [`TagWriteResult`].
    pub fn apply(
        &self,
        rules: Option<&RuleSet>,
        collection: &mut FileCollection,
    ) -> Result<TagWriteResult, ApplyError> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return Err(self.fail(ApplyError::Busy));
        };

        let rules = match rules {
            Some(rules) if !rules.is_empty() => rules,
            _ => return Err(self.fail(ApplyError::NoRulesConfigured)),
        };

        let selected = collection.selected();
        if selected.is_empty() {
            return Err(self.fail(ApplyError::NoFilesSelected));
        }

        let names = self
            .evaluator
            .evaluate(rules, &selected)
            .map_err(|e| self.fail(e.into()))?;
        if names.len() != selected.len() {
            return Err(self.fail(ApplyError::EvaluatorContract {
                expected: selected.len(),
                actual: names.len(),
            }));
        }

        info!(files = selected.len(), rules = rules.len(), policy = ?self.policy, "applying titles");
        let result = self.write_all(&selected, &names);
        drop(selected);

        if result.succeeded {
            collection.refresh();
            info!(written = result.processed_count, "batch apply finished");
        } else {
            info!(
                written = result.processed_count,
                not_attempted = result.not_attempted,
                "batch apply stopped with failures"
            );
        }
        Ok(result)
    }

    fn write_all(&self, selected: &[&FileEntry], names: &[String]) -> TagWriteResult {
        let mut result = TagWriteResult::default();
        for (i, (entry, name)) in selected.iter().zip(names).enumerate() {
            match self.writer.write(entry, name) {
                Ok(()) => {
                    debug!(path = %entry.full_path().display(), title = %name, "written");
                    result.processed_count += 1;
                }
                Err(e) => {
                    self.reporter.report(&e, false);
                    result.record_failure(entry.full_path(), e);
                    if self.policy == FailurePolicy::AbortOnFirst {
                        result.not_attempted = selected.len() - i - 1;
                        break;
                    }
                }
            }
        }
        result.succeeded = result.error.is_none();
        result
    }

    fn fail(&self, error: ApplyError) -> ApplyError {
        self.reporter.report(&error, false);
        error
    }
}
