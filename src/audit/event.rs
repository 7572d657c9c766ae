//! Decision event schema and types.

use std::fmt;

use crate::directive::NavigationDecision;
use crate::error::FaultKind;
use crate::request::{NavigationAction, TargetFrame};

/// Why a navigation action bypassed the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The action carried no URL
    NoUrl,
    /// The action was the controller's own corrective reload
    Suppressed,
    /// No policy is configured
    NoPolicy,
    /// The action targets a sub-frame
    Subframe,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoUrl => write!(f, "no_url"),
            SkipReason::Suppressed => write!(f, "suppressed"),
            SkipReason::NoPolicy => write!(f, "no_policy"),
            SkipReason::Subframe => write!(f, "subframe"),
        }
    }
}

/// How a navigation action was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// Allowed without consulting the policy
    Skipped(SkipReason),
    /// The policy allowed the request
    Allowed,
    /// The policy rejected the request
    Rejected,
    /// The policy rewrote the request; a new load was issued
    Modified {
        /// URL of the replacement load
        to_url: String,
    },
    /// The policy failed; the request was cancelled
    Faulted(FaultKind),
}

impl DecisionOutcome {
    /// Returns true if the policy was consulted.
    pub fn consulted_policy(&self) -> bool {
        !matches!(self, DecisionOutcome::Skipped(_))
    }
}

impl fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionOutcome::Skipped(reason) => write!(f, "skipped({})", reason),
            DecisionOutcome::Allowed => write!(f, "allowed"),
            DecisionOutcome::Rejected => write!(f, "rejected"),
            DecisionOutcome::Modified { to_url } => write!(f, "modified({})", to_url),
            DecisionOutcome::Faulted(kind) => write!(f, "faulted({})", kind),
        }
    }
}

/// One navigation-action decision.
///
/// # Example
///
/// ```
/// use webnav_core::audit::{DecisionEvent, DecisionOutcome};
/// use webnav_core::{NavigationAction, NavigationDecision};
///
/// let action = NavigationAction::main_frame("https://example.com")
///     .with_header("Authorization", "Bearer t0k3n");
/// let event = DecisionEvent::new(
///     "view-1",
///     1,
///     &action,
///     DecisionOutcome::Allowed,
///     NavigationDecision::Allow,
/// );
///
/// assert_eq!(event.header_count(), 1);
/// assert!(!event.to_string().contains("t0k3n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEvent {
    view_id: String,
    sequence: u64,
    url: Option<String>,
    method: Option<String>,
    header_count: usize,
    target: TargetFrame,
    outcome: DecisionOutcome,
    decision: NavigationDecision,
}

impl DecisionEvent {
    /// Creates an event describing how `action` was resolved.
    pub fn new(
        view_id: impl Into<String>,
        sequence: u64,
        action: &NavigationAction,
        outcome: DecisionOutcome,
        decision: NavigationDecision,
    ) -> Self {
        Self {
            view_id: view_id.into(),
            sequence,
            url: action.url.clone(),
            method: action.method.clone(),
            header_count: action.headers.len(),
            target: action.target,
            outcome,
            decision,
        }
    }

    /// Identifier of the view the action belonged to.
    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    /// Position of the action among the view's navigation actions, starting at 1.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Target URL, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Method as reported by the engine.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Number of request headers.
    pub fn header_count(&self) -> usize {
        self.header_count
    }

    /// Target frame.
    pub fn target(&self) -> TargetFrame {
        self.target
    }

    /// How the action was resolved.
    pub fn outcome(&self) -> &DecisionOutcome {
        &self.outcome
    }

    /// Decision returned to the engine.
    pub fn decision(&self) -> NavigationDecision {
        self.decision
    }
}

impl fmt::Display for DecisionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecisionEvent[view={}, seq={}, url={}, outcome={}, decision={}",
            self.view_id,
            self.sequence,
            self.url.as_deref().unwrap_or("<none>"),
            self.outcome,
            self.decision
        )?;
        if let Some(method) = &self.method {
            write!(f, ", method={}", method)?;
        }
        write!(f, ", headers={}]", self.header_count)
    }
}
