use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of an asynchronous request, as reported by the server.
///
/// Unknown wire values deserialize to [`ProcessingState::Unrecognized`]
/// instead of failing, so a server that introduces a new intermediate state
/// does not break status parsing. `Unrecognized` is never terminal: a wait
/// keeps polling through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingState {
    Queued,
    Processing,
    Complete,
    Failed,
    #[default]
    #[serde(other)]
    Unrecognized,
}

impl ProcessingState {
    /// Parses a wire value. Never fails.
    pub fn parse(value: &str) -> Self {
        match value {
            "queued" => ProcessingState::Queued,
            "processing" => ProcessingState::Processing,
            "complete" => ProcessingState::Complete,
            "failed" => ProcessingState::Failed,
            _ => ProcessingState::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingState::Queued => "queued",
            ProcessingState::Processing => "processing",
            ProcessingState::Complete => "complete",
            ProcessingState::Failed => "failed",
            ProcessingState::Unrecognized => "unrecognized",
        }
    }

    pub fn is_queued(&self) -> bool {
        matches!(self, ProcessingState::Queued)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, ProcessingState::Processing)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ProcessingState::Complete)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ProcessingState::Failed)
    }

    /// `Complete` or `Failed`: polling stops here.
    pub fn is_terminal(&self) -> bool {
        self.is_complete() || self.is_failed()
    }
}

impl FromStr for ProcessingState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProcessingState::parse(s))
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
