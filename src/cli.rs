//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for metarename using the `clap` crate.
//!
//! # Commands
//!
//! - **apply**: Evaluate rename rules over files and write the results as title tags
//! - **show**: List files with their current title, size and modification time
//! - **config**: Read or change a configuration value
//!
//! # Examples
//!
//! ```
//! use metarename::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["metarename", "apply", "a.mp3", "--trim", "-y"]);
//! assert!(matches!(cli.command, Commands::Apply { .. }));
//! ```

use clap::{Args, Parser, Subcommand};

use crate::rules::{CaseStyle, Rule, RuleSet};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "metarename")]
#[command(about = "Batch rename the title tags of media files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write rule-derived titles into the checked files
    #[command(visible_alias = "a")]
    Apply {
        /// Files to add (glob patterns are expanded)
        #[arg(value_name = "FILES", required = true, num_args = 1..)]
        files: Vec<String>,

        /// Keep a file in the list but leave it unchecked
        #[arg(long = "uncheck", value_name = "PATH")]
        uncheck: Vec<String>,

        #[command(flatten)]
        rules: RuleArgs,

        /// Keep writing after a failed file instead of stopping
        #[arg(long = "continue-on-error")]
        continue_on_error: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Show files with their current title
    #[command(visible_alias = "s")]
    Show {
        /// Files to list (glob patterns are expanded)
        #[arg(value_name = "FILES", required = true, num_args = 1..)]
        files: Vec<String>,

        /// Print JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., quiet=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., `failure_policy`)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

/// Rename rules given on the command line
///
/// Flags are applied in a fixed order: strip extension, replacements, regex
/// replacements, prefix/suffix removal, trim, case, then prefix/suffix addition.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Drop one more extension from the name
    #[arg(long = "strip-ext")]
    pub strip_ext: bool,

    /// Replace literal text (repeatable)
    #[arg(long = "replace", num_args = 2, value_names = ["FIND", "WITH"])]
    pub replace: Vec<String>,

    /// Replace a regex match; `$1` refers to capture groups (repeatable)
    #[arg(long = "regex", num_args = 2, value_names = ["PATTERN", "REPLACEMENT"])]
    pub regex: Vec<String>,

    /// Remove text from the start of the name
    #[arg(long = "remove-prefix", value_name = "TEXT")]
    pub remove_prefix: Option<String>,

    /// Remove text from the end of the name
    #[arg(long = "remove-suffix", value_name = "TEXT")]
    pub remove_suffix: Option<String>,

    /// Trim and collapse whitespace
    #[arg(long = "trim")]
    pub trim: bool,

    /// Change the letter case
    #[arg(long = "case", value_name = "STYLE", value_enum)]
    pub case: Option<CaseStyle>,

    /// Prepend text
    #[arg(long = "prefix", value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Append text
    #[arg(long = "suffix", value_name = "TEXT")]
    pub suffix: Option<String>,

    /// Ignore the rules stored in the config file
    #[arg(long = "no-config-rules")]
    pub no_config_rules: bool,
}

impl RuleArgs {
    /// Rules requested by the flags, in application order
    #[must_use]
    pub fn to_rule_set(&self) -> RuleSet {
        let mut rules = RuleSet::new();

        if self.strip_ext {
            rules.push(Rule::StripExtension);
        }
        for pair in self.replace.chunks_exact(2) {
            rules.push(Rule::Replace {
                find: pair[0].clone(),
                with: pair[1].clone(),
            });
        }
        for pair in self.regex.chunks_exact(2) {
            rules.push(Rule::RegexReplace {
                pattern: pair[0].clone(),
                replacement: pair[1].clone(),
            });
        }
        if let Some(text) = &self.remove_prefix {
            rules.push(Rule::RemovePrefix { text: text.clone() });
        }
        if let Some(text) = &self.remove_suffix {
            rules.push(Rule::RemoveSuffix { text: text.clone() });
        }
        if self.trim {
            rules.push(Rule::Trim);
        }
        if let Some(style) = self.case {
            rules.push(Rule::Case { style });
        }
        if let Some(text) = &self.prefix {
            rules.push(Rule::AddPrefix { text: text.clone() });
        }
        if let Some(text) = &self.suffix {
            rules.push(Rule::AddSuffix { text: text.clone() });
        }

        rules
    }

    /// Config rules followed by every command-line rule, duplicates included
    #[must_use]
    pub fn resolve(&self, config_rules: &RuleSet) -> RuleSet {
        let mut rules = if self.no_config_rules {
            RuleSet::new()
        } else {
            config_rules.clone()
        };
        rules.extend(self.to_rule_set().rules().to_vec());
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_rules(args: &[&str]) -> RuleArgs {
        let cli = Cli::parse_from(args);
        match cli.command {
            Commands::Apply { rules, .. } => rules,
            other => panic!("Expected Apply command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_apply() {
        let cli = Cli::parse_from([
            "metarename",
            "-q",
            "apply",
            "a.mp3",
            "b.mp3",
            "--uncheck",
            "b.mp3",
            "--continue-on-error",
            "-y",
        ]);
        assert!(cli.quiet);
        match cli.command {
            Commands::Apply {
                files,
                uncheck,
                continue_on_error,
                yes,
                ..
            } => {
                assert_eq!(files, vec!["a.mp3", "b.mp3"]);
                assert_eq!(uncheck, vec!["b.mp3"]);
                assert!(continue_on_error);
                assert!(yes);
            }
            other => panic!("Expected Apply command, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_requires_files() {
        assert!(Cli::try_parse_from(["metarename", "apply"]).is_err());
    }

    #[test]
    fn test_replace_pairs_are_chunked() {
        let rules = apply_rules(&[
            "metarename",
            "apply",
            "a.mp3",
            "--replace",
            "_",
            " ",
            "--replace",
            "feat",
            "ft.",
        ])
        .to_rule_set();

        assert_eq!(
            rules.rules(),
            &[
                Rule::Replace {
                    find: "_".into(),
                    with: " ".into()
                },
                Rule::Replace {
                    find: "feat".into(),
                    with: "ft.".into()
                },
            ]
        );
    }

    #[test]
    fn test_rule_flags_use_fixed_order() {
        let rules = apply_rules(&[
            "metarename",
            "apply",
            "a.mp3",
            "--suffix",
            "!",
            "--case",
            "upper",
            "--trim",
            "--regex",
            r"^\d+ ",
            "",
        ])
        .to_rule_set();

        assert_eq!(
            rules.rules(),
            &[
                Rule::RegexReplace {
                    pattern: r"^\d+ ".into(),
                    replacement: String::new()
                },
                Rule::Trim,
                Rule::Case {
                    style: CaseStyle::Upper
                },
                Rule::AddSuffix { text: "!".into() },
            ]
        );
    }

    #[test]
    fn test_resolve_appends_after_config_rules() {
        let config_rules = RuleSet::from(vec![Rule::Trim]);
        let args = apply_rules(&["metarename", "apply", "a.mp3", "--prefix", "X "]);

        let rules = args.resolve(&config_rules);
        assert_eq!(
            rules.rules(),
            &[Rule::Trim, Rule::AddPrefix { text: "X ".into() }]
        );

        let args = apply_rules(&[
            "metarename",
            "apply",
            "a.mp3",
            "--prefix",
            "X ",
            "--no-config-rules",
        ]);
        assert_eq!(args.resolve(&config_rules).len(), 1);
    }

    #[test]
    fn test_resolve_keeps_rules_repeated_from_config() {
        let config_rules = RuleSet::from(vec![
            Rule::AddSuffix { text: "!".into() },
            Rule::Case {
                style: CaseStyle::Upper,
            },
        ]);
        let args = apply_rules(&["metarename", "apply", "a.mp3", "--suffix", "!"]);

        let rules = args.resolve(&config_rules);
        assert_eq!(
            rules.rules(),
            &[
                Rule::AddSuffix { text: "!".into() },
                Rule::Case {
                    style: CaseStyle::Upper
                },
                Rule::AddSuffix { text: "!".into() },
            ]
        );
        assert_eq!(
            crate::rules::NameRuleEvaluator::evaluate_name(&rules, "go").unwrap(),
            "GO!!"
        );
    }

    #[test]
    fn test_parse_config_commands() {
        let cli = Cli::parse_from(["metarename", "config", "set", "quiet=true"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Set { ref setting }
            } if setting == "quiet=true"
        ));

        let cli = Cli::parse_from(["metarename", "config", "get", "failure_policy"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Get { ref key }
            } if key == "failure_policy"
        ));
    }

    #[test]
    fn test_show_alias() {
        let cli = Cli::parse_from(["metarename", "s", "a.mp3", "--json"]);
        assert!(matches!(cli.command, Commands::Show { json: true, .. }));
    }
}
