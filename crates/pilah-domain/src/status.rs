//! Image classification lifecycle state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a single image's classification attempt.
///
/// Legal transitions: `Pending → Processing → {Completed, Failed}`.
/// `Completed` and `Failed` are absorbing; [`ImageStatus::transition`]
/// rejects everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Rejected status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal status transition {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: ImageStatus,
    pub to: ImageStatus,
}

impl ImageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }

    /// Parse the stored column value. Returns `None` for unknown strings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Processing" => Some(Self::Processing),
            "Completed" => Some(Self::Completed),
            "Failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Validate a transition, returning the new state or the rejection.
    pub fn transition(self, to: ImageStatus) -> Result<ImageStatus, InvalidTransition> {
        let legal = matches!(
            (self, to),
            (Self::Pending, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        );
        if legal {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }
}

impl std::fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
