#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle status of a node.
///
/// `Idle` is never produced by an update; it marks a node that has not started or that was
/// force-cancelled by a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    #[default]
    Idle,
    Running,
    Success,
    Failure,
}

impl Status {
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_concluded(self) -> bool {
        matches!(self, Status::Success | Status::Failure)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Running => "running",
            Status::Success => "success",
            Status::Failure => "failure",
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(Status::default(), Status::Idle);
    }

    #[test]
    fn only_success_and_failure_conclude() {
        assert!(!Status::Idle.is_concluded());
        assert!(!Status::Running.is_concluded());
        assert!(Status::Success.is_concluded());
        assert!(Status::Failure.is_concluded());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Status::Running.to_string(), "running");
        assert_eq!(Status::Failure.to_string(), "failure");
    }
}
