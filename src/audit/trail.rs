//! In-memory decision recorder.

use super::DecisionEvent;

/// In-memory recorder for decision events.
///
/// Stores events in the order they are recorded. A controller keeps one
/// when built with `record_decisions(true)`. Nothing is evicted: the owner
/// drains it with [`take`](Self::take) or [`clear`](Self::clear).
///
/// # Example
///
/// ```
/// use webnav_core::audit::{DecisionEvent, DecisionOutcome, DecisionTrail};
/// use webnav_core::{NavigationAction, NavigationDecision};
///
/// let mut trail = DecisionTrail::new();
/// trail.record(DecisionEvent::new(
///     "view-1",
///     1,
///     &NavigationAction::main_frame("https://a"),
///     DecisionOutcome::Rejected,
///     NavigationDecision::Cancel,
/// ));
///
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionTrail {
    events: Vec<DecisionEvent>,
}

impl DecisionTrail {
    /// Creates a new empty trail.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Records a decision event.
    pub fn record(&mut self, event: DecisionEvent) {
        self.events.push(event);
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[DecisionEvent] {
        &self.events
    }

    /// Number of events that consulted the policy.
    pub fn policy_calls(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.outcome().consulted_policy())
            .count()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clears all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Removes and returns all recorded events.
    pub fn take(&mut self) -> Vec<DecisionEvent> {
        std::mem::take(&mut self.events)
    }
}
