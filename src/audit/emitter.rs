//! Emits decision events through `tracing`.

use super::{DecisionEvent, DecisionTrail};

/// Tracing target used for decision events.
pub const AUDIT_TARGET: &str = "webnav_audit";

/// Emits decision events as structured tracing events.
///
/// Subscribers can route or filter them by [`AUDIT_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEmitter;

impl DecisionEmitter {
    /// Creates a new emitter.
    pub fn new() -> Self {
        Self
    }

    /// Emits `event` at debug level under [`AUDIT_TARGET`].
    pub fn emit(&self, event: &DecisionEvent) {
        tracing::debug!(
            target: AUDIT_TARGET,
            view_id = %event.view_id(),
            sequence = event.sequence(),
            url = ?event.url(),
            method = ?event.method(),
            header_count = event.header_count(),
            target_frame = ?event.target(),
            outcome = %event.outcome(),
            decision = %event.decision(),
            "navigation decision"
        );
    }

    /// Emits `event` and, when a trail is given, records it there too.
    pub fn emit_and_record(&self, event: DecisionEvent, trail: Option<&mut DecisionTrail>) {
        self.emit(&event);
        if let Some(trail) = trail {
            trail.record(event);
        }
    }
}
