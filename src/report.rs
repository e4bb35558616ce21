//! Error reporting sink
//!
//! [`ErrorReporter::report`] always writes the message to the durable log through
//! `tracing::error!`; the subscriber installed by [`crate::logging`] routes it to the
//! log file. When the caller asks for it, the message is also handed to an
//! [`OperatorChannel`]. The reporter never retries, filters or deduplicates.

use std::fmt::Display;

use colored::Colorize;
use tracing::error;

/// Operator-facing output for messages that need attention
pub trait OperatorChannel {
    fn surface(&self, message: &str);
}

/// Prints surfaced messages to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleChannel;

impl OperatorChannel for ConsoleChannel {
    fn surface(&self, message: &str) {
        eprintln!("{} {}", "Error!".red().bold(), message);
    }
}

/// Drops surfaced messages; they still reach the log
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentChannel;

impl OperatorChannel for SilentChannel {
    fn surface(&self, _message: &str) {}
}

/// Pass-through sink: the caller decides urgency, the reporter decides visibility
pub struct ErrorReporter {
    channel: Box<dyn OperatorChannel>,
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(ConsoleChannel)
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter").finish_non_exhaustive()
    }
}

impl ErrorReporter {
    pub fn new(channel: impl OperatorChannel + 'static) -> Self {
        Self {
            channel: Box::new(channel),
        }
    }

    /// Reporter that never surfaces anything (quiet mode)
    #[must_use]
    pub fn silent() -> Self {
        Self::new(SilentChannel)
    }

    /// Record `message`; also surface it to the operator when `surface_to_operator`
    pub fn report(&self, message: impl Display, surface_to_operator: bool) {
        let message = message.to_string();
        error!(surfaced = surface_to_operator, "{message}");
        if surface_to_operator {
            self.channel.surface(&message);
        }
    }
}
