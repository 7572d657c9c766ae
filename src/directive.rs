//! Controller-to-engine commands.

use std::fmt;

use crate::request::Headers;

/// Answer to a navigation action, returned to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the navigation proceed
    Allow,
    /// Cancel the navigation
    Cancel,
}

impl fmt::Display for NavigationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationDecision::Allow => write!(f, "allow"),
            NavigationDecision::Cancel => write!(f, "cancel"),
        }
    }
}

/// A command sent from the controller (or the host, through it) to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Stop any in-flight load. Must be a no-op when nothing is loading.
    StopLoading,
    /// Start a new top-level load
    LoadUrl {
        /// URL to load
        url: String,
        /// Headers to send
        headers: Headers,
    },
    /// Run a script in the current document, best effort
    EvaluateScript(String),
    /// Navigate to the previous history entry
    GoBack,
    /// Navigate to the next history entry
    GoForward,
    /// Reload the current page
    Reload,
}

impl Directive {
    /// Short name used in log fields and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Directive::StopLoading => "stop_loading",
            Directive::LoadUrl { .. } => "load_url",
            Directive::EvaluateScript(_) => "evaluate_script",
            Directive::GoBack => "go_back",
            Directive::GoForward => "go_forward",
            Directive::Reload => "reload",
        }
    }
}

/// The engine side of a view.
///
/// Directives are fire-and-forget: the controller never waits for an
/// acknowledgment and never observes failures.
pub trait Engine {
    /// Carries out `directive`.
    fn dispatch(&mut self, directive: Directive);
}

/// An [`Engine`] that only records what it was asked to do.
///
/// Useful for tests and for hosts that apply directives in a later pass.
///
/// # Examples
///
/// ```
/// use webnav_core::{Directive, Engine, RecordingEngine};
///
/// let mut engine = RecordingEngine::new();
/// engine.dispatch(Directive::StopLoading);
/// assert_eq!(engine.directives(), &[Directive::StopLoading]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingEngine {
    directives: Vec<Directive>,
}

impl RecordingEngine {
    /// Creates an engine with no recorded directives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directives received so far, oldest first.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Removes and returns all recorded directives.
    pub fn take(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.directives)
    }

    /// Number of recorded directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl Engine for RecordingEngine {
    fn dispatch(&mut self, directive: Directive) {
        self.directives.push(directive);
    }
}
