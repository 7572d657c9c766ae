//! The navigation controller.
//!
//! One controller is paired with one view. It receives the engine's
//! lifecycle callbacks as [`EngineEvent`]s, keeps the host-visible state in
//! step with them, and answers every navigation action with a
//! [`NavigationDecision`] after consulting the configured
//! [`RequestInterceptor`].
//!
//! # Redirect suppression
//!
//! A `Modify` verdict makes the controller stop the current load and start
//! the replacement itself. The engine then reports a navigation action for
//! that replacement. The controller sets a one-shot flag so that the very
//! next navigation action, whatever it is, is allowed without asking the
//! policy again. A policy that always rewrites therefore causes exactly one
//! corrective load instead of an endless loop.

use std::panic::{self, AssertUnwindSafe};

use crate::audit::{DecisionEmitter, DecisionEvent, DecisionOutcome, DecisionTrail, SkipReason};
use crate::config::WebSettings;
use crate::directive::{Directive, Engine, NavigationDecision};
use crate::error::{panic_message, Error, InterceptError};
use crate::event::EngineEvent;
use crate::hook::{CommitHook, ViewportHook};
use crate::logging::NavLog;
use crate::policy::{self, InterceptVerdict, RequestInterceptor};
use crate::request::{Headers, NavigationAction, PendingRequest, TargetFrame};
use crate::state::{LoadState, NavCapabilities, RequestError, ViewSnapshot};

enum HookChoice {
    Viewport,
    Custom(Box<dyn CommitHook>),
    Disabled,
}

/// Builder for [`NavigationController`].
///
/// # Examples
///
/// ```
/// use webnav_core::{BlockList, NavigationController, WebSettings};
///
/// let controller = NavigationController::builder("main-view")
///     .interceptor(BlockList::new().block("http://"))
///     .settings(WebSettings::new().with_support_zoom(false))
///     .record_decisions(true)
///     .build();
///
/// assert_eq!(controller.view_id(), "main-view");
/// assert!(controller.has_interceptor());
/// ```
pub struct ControllerBuilder {
    view_id: String,
    interceptor: Option<Box<dyn RequestInterceptor>>,
    hook: HookChoice,
    settings: WebSettings,
    record_decisions: bool,
}

impl ControllerBuilder {
    fn new(view_id: String) -> Self {
        Self {
            view_id,
            interceptor: None,
            hook: HookChoice::Viewport,
            settings: WebSettings::default(),
            record_decisions: false,
        }
    }

    /// Sets the interception policy. Without one every navigation is allowed.
    pub fn interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptor = Some(Box::new(interceptor));
        self
    }

    /// Replaces the default viewport hook with `hook`.
    pub fn commit_hook(mut self, hook: impl CommitHook + 'static) -> Self {
        self.hook = HookChoice::Custom(Box::new(hook));
        self
    }

    /// Runs nothing on commit.
    pub fn without_commit_hook(mut self) -> Self {
        self.hook = HookChoice::Disabled;
        self
    }

    /// Sets the display settings used by the default viewport hook.
    pub fn settings(mut self, settings: WebSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Keeps every decision in an in-memory [`DecisionTrail`].
    pub fn record_decisions(mut self, record: bool) -> Self {
        self.record_decisions = record;
        self
    }

    /// Builds the controller in the `Idle` state.
    pub fn build(self) -> NavigationController {
        let commit_hook: Option<Box<dyn CommitHook>> = match self.hook {
            HookChoice::Viewport => Some(Box::new(ViewportHook::new(self.settings))),
            HookChoice::Custom(hook) => Some(hook),
            HookChoice::Disabled => None,
        };

        NavigationController {
            log: NavLog::new(self.view_id),
            interceptor: self.interceptor,
            commit_hook,
            settings: self.settings,
            emitter: DecisionEmitter::new(),
            trail: self.record_decisions.then(DecisionTrail::new),
            load_state: LoadState::Idle,
            errors: Vec::new(),
            intercept_errors: Vec::new(),
            capabilities: NavCapabilities::default(),
            last_attempted_url: None,
            last_loaded_url: None,
            page_title: None,
            suppress_next_action: false,
            action_count: 0,
        }
    }
}

/// Tracks one view's navigation lifecycle and decides on its navigation actions.
///
/// All mutation goes through `&mut self`, so events for one view are
/// handled strictly one at a time.
///
/// # Examples
///
/// ```
/// use webnav_core::{
///     InterceptVerdict, LoadState, ModifiedRequest, NavigationAction, NavigationController,
///     NavigationDecision, PendingRequest, PolicyFault, RecordingEngine,
/// };
///
/// let mut controller = NavigationController::builder("view-1")
///     .interceptor(|_: &PendingRequest| -> Result<InterceptVerdict, PolicyFault> {
///         Ok(InterceptVerdict::Modify(ModifiedRequest::new("https://b")))
///     })
///     .build();
/// let mut engine = RecordingEngine::new();
///
/// controller.on_provisional_start(Some("https://a"));
/// assert_eq!(controller.load_state(), LoadState::Loading(0.0));
///
/// let first =
///     controller.on_navigation_action(NavigationAction::main_frame("https://a"), &mut engine);
/// assert_eq!(first, NavigationDecision::Cancel);
///
/// // The replacement load is not intercepted again.
/// let second =
///     controller.on_navigation_action(NavigationAction::main_frame("https://b"), &mut engine);
/// assert_eq!(second, NavigationDecision::Allow);
/// ```
pub struct NavigationController {
    log: NavLog,
    interceptor: Option<Box<dyn RequestInterceptor>>,
    commit_hook: Option<Box<dyn CommitHook>>,
    settings: WebSettings,
    emitter: DecisionEmitter,
    trail: Option<DecisionTrail>,
    load_state: LoadState,
    errors: Vec<RequestError>,
    intercept_errors: Vec<InterceptError>,
    capabilities: NavCapabilities,
    last_attempted_url: Option<String>,
    last_loaded_url: Option<String>,
    page_title: Option<String>,
    suppress_next_action: bool,
    action_count: u64,
}

impl NavigationController {
    /// Starts building a controller for the view named `view_id`.
    pub fn builder(view_id: impl Into<String>) -> ControllerBuilder {
        ControllerBuilder::new(view_id.into())
    }

    /// Creates a controller with no policy and the default viewport hook.
    pub fn new(view_id: impl Into<String>) -> Self {
        Self::builder(view_id).build()
    }

    // ------------------------------------------------------------------
    // Engine-facing entry points
    // ------------------------------------------------------------------

    /// Applies one engine event.
    ///
    /// Returns `Some` decision for [`EngineEvent::NavigationAction`] and
    /// `None` for every other event.
    pub fn handle(
        &mut self,
        event: EngineEvent,
        engine: &mut dyn Engine,
    ) -> Option<NavigationDecision> {
        match event {
            EngineEvent::ProvisionalStart { url } => {
                self.load_state = LoadState::Loading(0.0);
                self.errors.clear();
                self.log.set_url(url.as_deref());
                self.log.info(format_args!(
                    "provisional navigation started: {}",
                    url.as_deref().unwrap_or("<none>")
                ));
                self.last_attempted_url = url;
                None
            }
            EngineEvent::Commit => {
                self.log.info(format_args!("navigation committed"));
                if let Some(hook) = &self.commit_hook {
                    let ran = panic::catch_unwind(AssertUnwindSafe(|| hook.on_commit(engine)));
                    if let Err(payload) = ran {
                        let message = panic_message(payload.as_ref())
                            .unwrap_or_else(|| "commit hook panicked".to_string());
                        self.log.warn(format_args!("commit hook failed: {}", message));
                    }
                }
                None
            }
            EngineEvent::Finish {
                url,
                title,
                can_go_back,
                can_go_forward,
            } => {
                self.load_state = LoadState::Finished;
                self.capabilities = NavCapabilities {
                    can_go_back,
                    can_go_forward,
                };
                self.page_title = title;
                self.log.set_url(url.as_deref());
                self.log.info(format_args!(
                    "navigation finished: {} (back={}, forward={})",
                    url.as_deref().unwrap_or("<none>"),
                    can_go_back,
                    can_go_forward
                ));
                self.last_loaded_url = url;
                None
            }
            EngineEvent::ProvisionalFail { code, description } => {
                self.log.warn(format_args!(
                    "navigation failed with error {}: {}",
                    code, description
                ));
                self.errors.push(RequestError {
                    code,
                    description,
                    is_from_main_frame: true,
                });
                self.load_state = LoadState::Failed;
                None
            }
            EngineEvent::Progress(fraction) => {
                // Progress never leaves the Loading state.
                if let LoadState::Loading(_) = self.load_state {
                    if fraction.is_finite() {
                        self.load_state = LoadState::Loading(fraction.clamp(0.0, 1.0));
                    }
                }
                None
            }
            EngineEvent::TitleChanged(title) => {
                self.page_title = title;
                None
            }
            EngineEvent::NavigationAction(action) => Some(self.decide(action, engine)),
        }
    }

    /// Handles [`EngineEvent::ProvisionalStart`].
    pub fn on_provisional_start(&mut self, url: Option<&str>) {
        let url = url.map(str::to_string);
        self.handle(EngineEvent::ProvisionalStart { url }, &mut NullEngine);
    }

    /// Handles [`EngineEvent::Commit`], running the commit hook against `engine`.
    pub fn on_commit(&mut self, engine: &mut dyn Engine) {
        self.handle(EngineEvent::Commit, engine);
    }

    /// Handles [`EngineEvent::Finish`].
    pub fn on_finish(
        &mut self,
        url: Option<&str>,
        title: Option<&str>,
        can_go_back: bool,
        can_go_forward: bool,
    ) {
        let event = EngineEvent::Finish {
            url: url.map(str::to_string),
            title: title.map(str::to_string),
            can_go_back,
            can_go_forward,
        };
        self.handle(event, &mut NullEngine);
    }

    /// Handles [`EngineEvent::ProvisionalFail`].
    pub fn on_provisional_fail(&mut self, code: i32, description: impl Into<String>) {
        let event = EngineEvent::ProvisionalFail {
            code,
            description: description.into(),
        };
        self.handle(event, &mut NullEngine);
    }

    /// Handles [`EngineEvent::Progress`].
    pub fn on_progress(&mut self, fraction: f32) {
        self.handle(EngineEvent::Progress(fraction), &mut NullEngine);
    }

    /// Handles [`EngineEvent::TitleChanged`].
    pub fn on_title_changed(&mut self, title: Option<&str>) {
        let title = title.map(str::to_string);
        self.handle(EngineEvent::TitleChanged(title), &mut NullEngine);
    }

    /// Handles [`EngineEvent::NavigationAction`] and returns the decision.
    pub fn on_navigation_action(
        &mut self,
        action: NavigationAction,
        engine: &mut dyn Engine,
    ) -> NavigationDecision {
        self.decide(action, engine)
    }

    fn decide(&mut self, action: NavigationAction, engine: &mut dyn Engine) -> NavigationDecision {
        self.action_count += 1;
        // Any navigation action consumes a pending suppression.
        let suppressed = std::mem::take(&mut self.suppress_next_action);

        let (outcome, decision) = self.resolve(&action, suppressed, engine);

        let event = DecisionEvent::new(
            self.log.view_id(),
            self.action_count,
            &action,
            outcome,
            decision,
        );
        self.emitter.emit_and_record(event, self.trail.as_mut());
        decision
    }

    fn resolve(
        &mut self,
        action: &NavigationAction,
        suppressed: bool,
        engine: &mut dyn Engine,
    ) -> (DecisionOutcome, NavigationDecision) {
        let skip = |reason| (DecisionOutcome::Skipped(reason), NavigationDecision::Allow);

        let Some(url) = action.url.as_deref() else {
            return skip(SkipReason::NoUrl);
        };
        if suppressed {
            return skip(SkipReason::Suppressed);
        }
        let Some(interceptor) = self.interceptor.as_deref() else {
            return skip(SkipReason::NoPolicy);
        };
        if action.target == TargetFrame::Subframe {
            return skip(SkipReason::Subframe);
        }

        let request = PendingRequest::new(
            url.to_string(),
            action.headers.clone(),
            action.method.clone(),
            action.target,
            // Already consumed above, so this is always false.
            self.suppress_next_action,
        );

        match policy::evaluate(interceptor, &request) {
            Ok(InterceptVerdict::Allow) => (DecisionOutcome::Allowed, NavigationDecision::Allow),
            Ok(InterceptVerdict::Reject) => (DecisionOutcome::Rejected, NavigationDecision::Cancel),
            Ok(InterceptVerdict::Modify(modified)) => {
                self.suppress_next_action = true;
                self.log.info(format_args!(
                    "rewriting navigation {} -> {}",
                    url, modified.url
                ));
                let to_url = modified.url.clone();
                engine.dispatch(Directive::StopLoading);
                engine.dispatch(Directive::LoadUrl {
                    url: modified.url,
                    headers: modified.headers,
                });
                (
                    DecisionOutcome::Modified { to_url },
                    NavigationDecision::Cancel,
                )
            }
            Err(fault) => {
                self.log.error(format_args!(
                    "interception policy failed for {}: {}",
                    url, fault
                ));
                let kind = fault.kind;
                self.intercept_errors.push(InterceptError {
                    url: url.to_string(),
                    fault,
                });
                (DecisionOutcome::Faulted(kind), NavigationDecision::Cancel)
            }
        }
    }

    // ------------------------------------------------------------------
    // Host-facing directives
    // ------------------------------------------------------------------

    /// Navigates back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectiveUnavailable`] if the last finished
    /// navigation reported no back history.
    pub fn go_back(&self, engine: &mut dyn Engine) -> Result<(), Error> {
        if !self.capabilities.can_go_back {
            return Err(Error::DirectiveUnavailable {
                directive: Directive::GoBack.name(),
            });
        }
        self.issue(Directive::GoBack, engine);
        Ok(())
    }

    /// Navigates forward.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectiveUnavailable`] if the last finished
    /// navigation reported no forward history.
    pub fn go_forward(&self, engine: &mut dyn Engine) -> Result<(), Error> {
        if !self.capabilities.can_go_forward {
            return Err(Error::DirectiveUnavailable {
                directive: Directive::GoForward.name(),
            });
        }
        self.issue(Directive::GoForward, engine);
        Ok(())
    }

    /// Reloads the current page.
    pub fn reload(&self, engine: &mut dyn Engine) {
        self.issue(Directive::Reload, engine);
    }

    /// Stops any in-flight load. Safe to call when nothing is loading.
    pub fn stop_loading(&self, engine: &mut dyn Engine) {
        self.issue(Directive::StopLoading, engine);
    }

    /// Starts a new load of `url` with `headers`.
    ///
    /// The resulting navigation action goes through the policy like any other.
    pub fn load_url(&self, url: impl Into<String>, headers: Headers, engine: &mut dyn Engine) {
        let directive = Directive::LoadUrl {
            url: url.into(),
            headers,
        };
        self.issue(directive, engine);
    }

    fn issue(&self, directive: Directive, engine: &mut dyn Engine) {
        self.log.debug(format_args!("dispatching {}", directive.name()));
        engine.dispatch(directive);
    }

    // ------------------------------------------------------------------
    // Host-visible state
    // ------------------------------------------------------------------

    /// Identifier of the view this controller serves.
    pub fn view_id(&self) -> &str {
        self.log.view_id()
    }

    /// Returns true if an interception policy is configured.
    pub fn has_interceptor(&self) -> bool {
        self.interceptor.is_some()
    }

    /// Display settings in use.
    pub fn settings(&self) -> &WebSettings {
        &self.settings
    }

    /// Current load phase.
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Load errors for the current attempt, oldest first.
    pub fn errors(&self) -> &[RequestError] {
        &self.errors
    }

    /// Policy failures not yet drained with [`take_intercept_errors`](Self::take_intercept_errors).
    ///
    /// Unlike [`errors`](Self::errors) this list is never cleared by the
    /// controller. It keeps growing until the host drains it.
    pub fn intercept_errors(&self) -> &[InterceptError] {
        &self.intercept_errors
    }

    /// Removes and returns the outstanding policy failures.
    pub fn take_intercept_errors(&mut self) -> Vec<InterceptError> {
        std::mem::take(&mut self.intercept_errors)
    }

    /// Back/forward availability as of the last finished navigation.
    pub fn capabilities(&self) -> NavCapabilities {
        self.capabilities
    }

    /// URL of the most recent provisional start.
    pub fn last_attempted_url(&self) -> Option<&str> {
        self.last_attempted_url.as_deref()
    }

    /// URL of the most recent finished navigation.
    pub fn last_loaded_url(&self) -> Option<&str> {
        self.last_loaded_url.as_deref()
    }

    /// Engine-reported document title.
    pub fn page_title(&self) -> Option<&str> {
        self.page_title.as_deref()
    }

    /// Returns true if the next navigation action will bypass the policy.
    pub fn is_suppressing_next_action(&self) -> bool {
        self.suppress_next_action
    }

    /// Recorded decisions, when built with `record_decisions(true)`.
    pub fn trail(&self) -> Option<&DecisionTrail> {
        self.trail.as_ref()
    }

    /// Removes and returns the recorded decisions, leaving the trail empty.
    ///
    /// Returns an empty list when recording is off. The trail keeps every
    /// decision until drained here.
    pub fn take_decisions(&mut self) -> Vec<DecisionEvent> {
        self.trail.as_mut().map(DecisionTrail::take).unwrap_or_default()
    }

    /// Copies the host-visible state.
    ///
    /// Undrained policy failures are copied too, so hosts polling snapshots
    /// should drain them with [`take_intercept_errors`](Self::take_intercept_errors).
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            load_state: self.load_state,
            last_attempted_url: self.last_attempted_url.clone(),
            last_loaded_url: self.last_loaded_url.clone(),
            page_title: self.page_title.clone(),
            capabilities: self.capabilities,
            errors: self.errors.clone(),
            intercept_errors: self.intercept_errors.clone(),
        }
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("view_id", &self.log.view_id())
            .field("load_state", &self.load_state)
            .field("has_interceptor", &self.interceptor.is_some())
            .field("suppress_next_action", &self.suppress_next_action)
            .finish_non_exhaustive()
    }
}

/// Engine stand-in for events that never dispatch directives.
struct NullEngine;

impl Engine for NullEngine {
    fn dispatch(&mut self, _directive: Directive) {}
}
