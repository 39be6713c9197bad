// src/domain/content/workflow.rs
//! Approval state machine. `Pending` is initial; `Approved` and `Denied` are
//! terminal for notification purposes. Only the `Pending -> Approved` edge
//! publishes an item to its subscribers.
use crate::domain::content::value_objects::ApprovalStatus;

/// Editorial decision taken from the review buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Deny,
}

impl ReviewDecision {
    pub fn target(&self) -> ApprovalStatus {
        match self {
            ReviewDecision::Approve => ApprovalStatus::Approved,
            ReviewDecision::Deny => ApprovalStatus::Denied,
        }
    }
}

/// Persisted status before and after one write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    pub before: ApprovalStatus,
    pub after: ApprovalStatus,
}

impl StatusTransition {
    pub fn new(before: ApprovalStatus, after: ApprovalStatus) -> Self {
        Self { before, after }
    }

    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }

    /// True exactly when the write crossed `Pending -> Approved`.
    pub fn publishes(&self) -> bool {
        matches!(
            (self.before, self.after),
            (ApprovalStatus::Pending, ApprovalStatus::Approved)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApprovalStatus::{Approved, Denied, Pending};

    #[test]
    fn only_pending_to_approved_publishes() {
        let all = [Pending, Approved, Denied];
        for before in all {
            for after in all {
                let transition = StatusTransition::new(before, after);
                assert_eq!(
                    transition.publishes(),
                    before == Pending && after == Approved,
                    "{before} -> {after}"
                );
            }
        }
    }

    #[test]
    fn resaving_is_a_noop() {
        assert!(StatusTransition::new(Approved, Approved).is_noop());
        assert!(!StatusTransition::new(Approved, Approved).publishes());
    }

    #[test]
    fn decisions_map_to_terminal_states() {
        assert_eq!(ReviewDecision::Approve.target(), Approved);
        assert_eq!(ReviewDecision::Deny.target(), Denied);
    }
}
