//! Interception decision audit.
//!
//! This module provides:
//! - `DecisionEvent`: Structured record of one navigation-action decision
//! - `DecisionTrail`: In-memory recorder of decision events
//! - `DecisionEmitter`: Emits decision events through `tracing`
//!
//! Decision events are safe to log:
//! - Header values are never stored, only their count
//! - Policy fault messages are not copied, only the fault kind

mod emitter;
mod event;
mod trail;

pub use emitter::{DecisionEmitter, AUDIT_TARGET};
pub use event::{DecisionEvent, DecisionOutcome, SkipReason};
pub use trail::DecisionTrail;
