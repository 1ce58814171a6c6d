//! User-facing notices produced by the reducer.
//!
//! Notices replace any kind of alert or panic: a host shows them to the
//! player, logs them, or ignores them. They never carry control flow.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, RuleViolation};

/// Category of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeKind {
    /// The action broke a rule; the state is unchanged.
    Rejected,
    /// Informational feedback about an accepted action.
    Info,
    /// A committed staging stack failed validation and was broken up.
    Disbanded,
    /// A new round was dealt.
    RoundOver,
    /// The game finished and was scored.
    GameOver,
    /// The engine and the action disagree about the state. Indicates a bug
    /// or a desynchronized host; the state is unchanged.
    InternalError,
}

/// A message for the players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    #[must_use]
    pub fn rejected(violation: &RuleViolation) -> Self {
        Self::new(NoticeKind::Rejected, violation.to_string())
    }

    #[must_use]
    pub fn internal(error: &EngineError) -> Self {
        Self::new(NoticeKind::InternalError, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_uses_violation_message() {
        let notice = Notice::rejected(&RuleViolation::TrailWhileOwningBuild);
        assert_eq!(notice.kind, NoticeKind::Rejected);
        assert_eq!(notice.message, "you cannot trail while you own a build in round 1");
    }

    #[test]
    fn test_internal_notice() {
        let notice = Notice::internal(&EngineError::EmptyCapturePile);
        assert_eq!(notice.kind, NoticeKind::InternalError);
        assert!(notice.message.contains("capture pile"));
    }
}
