use crate::request::NavigationAction;

/// A lifecycle callback reported by the engine.
///
/// Within one navigation attempt the engine delivers `ProvisionalStart`,
/// then optionally `Commit`, then `Finish` or `ProvisionalFail`.
/// `NavigationAction` events arrive before the commit.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A new top-level navigation started
    ProvisionalStart {
        /// Requested URL, if known
        url: Option<String>,
    },
    /// The navigation began receiving real content
    Commit,
    /// The navigation completed
    Finish {
        /// Committed URL
        url: Option<String>,
        /// Document title
        title: Option<String>,
        /// Engine back-history availability
        can_go_back: bool,
        /// Engine forward-history availability
        can_go_forward: bool,
    },
    /// The navigation failed before committing
    ProvisionalFail {
        /// Engine error code
        code: i32,
        /// Localized description
        description: String,
    },
    /// Loading progress changed (fraction in 0.0..=1.0)
    Progress(f32),
    /// The document title changed
    TitleChanged(Option<String>),
    /// The engine asks whether a navigation may proceed
    NavigationAction(NavigationAction),
}

impl EngineEvent {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::ProvisionalStart { .. } => "provisional_start",
            EngineEvent::Commit => "commit",
            EngineEvent::Finish { .. } => "finish",
            EngineEvent::ProvisionalFail { .. } => "provisional_fail",
            EngineEvent::Progress(_) => "progress",
            EngineEvent::TitleChanged(_) => "title_changed",
            EngineEvent::NavigationAction(_) => "navigation_action",
        }
    }
}
