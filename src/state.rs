//! Load-state model for a single view.
//!
//! This module holds the data the controller keeps in sync with the
//! engine: the current [`LoadState`], the errors reported for the current
//! navigation attempt, and the back/forward [`NavCapabilities`].

use std::fmt;

use crate::error::InterceptError;

/// Phase of the current navigation attempt.
///
/// ```text
/// Idle --start--> Loading --finish--> Finished
///                    |
///                    +----fail------> Failed
/// ```
///
/// A new start is accepted from any state and resets to `Loading(0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LoadState {
    /// No navigation has started yet
    #[default]
    Idle,
    /// A navigation is in progress; the value is the fraction loaded (0.0..=1.0)
    Loading(f32),
    /// The last navigation completed
    Finished,
    /// The last navigation failed before committing
    Failed,
}

impl LoadState {
    /// Returns true while a navigation is in progress.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading(_))
    }

    /// Returns true for `Finished` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Finished | LoadState::Failed)
    }

    /// Loading progress, if a navigation is in progress.
    pub fn progress(&self) -> Option<f32> {
        match self {
            LoadState::Loading(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Idle => write!(f, "idle"),
            LoadState::Loading(p) => write!(f, "loading({:.2})", p),
            LoadState::Finished => write!(f, "finished"),
            LoadState::Failed => write!(f, "failed"),
        }
    }
}

/// A navigation failure reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// Engine-specific error code
    pub code: i32,
    /// Localized description from the engine
    pub description: String,
    /// Whether the failure belongs to the main frame
    pub is_from_main_frame: bool,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load error {}: {}", self.code, self.description)
    }
}

/// Back/forward availability, refreshed when a navigation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavCapabilities {
    /// Whether the engine has a previous history entry
    pub can_go_back: bool,
    /// Whether the engine has a next history entry
    pub can_go_forward: bool,
}

/// Read-only copy of everything the host may observe about a view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewSnapshot {
    /// Current load phase
    pub load_state: LoadState,
    /// URL of the most recent provisional start
    pub last_attempted_url: Option<String>,
    /// URL of the most recent finished navigation
    pub last_loaded_url: Option<String>,
    /// Engine-reported document title
    pub page_title: Option<String>,
    /// Back/forward availability
    pub capabilities: NavCapabilities,
    /// Load errors for the current attempt, oldest first
    pub errors: Vec<RequestError>,
    /// Policy evaluation failures not yet drained by the host
    pub intercept_errors: Vec<InterceptError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(LoadState::default(), LoadState::Idle);
        assert!(!LoadState::Idle.is_loading());
        assert!(!LoadState::Idle.is_terminal());
    }

    #[test]
    fn progress_only_while_loading() {
        assert_eq!(LoadState::Loading(0.25).progress(), Some(0.25));
        assert_eq!(LoadState::Finished.progress(), None);
        assert_eq!(LoadState::Failed.progress(), None);
    }

    #[test]
    fn terminal_states() {
        assert!(LoadState::Finished.is_terminal());
        assert!(LoadState::Failed.is_terminal());
        assert!(!LoadState::Loading(1.0).is_terminal());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(LoadState::Loading(0.5).to_string(), "loading(0.50)");
        assert_eq!(LoadState::Failed.to_string(), "failed");
    }

    #[test]
    fn request_error_display() {
        let err = RequestError {
            code: -1009,
            description: "offline".to_string(),
            is_from_main_frame: true,
        };
        assert_eq!(err.to_string(), "load error -1009: offline");
    }
}
