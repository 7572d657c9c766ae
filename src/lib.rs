//! Navigation lifecycle tracking and request interception for embedded web views.
//!
//! This crate sits between a host application and a browser engine. It
//! provides:
//! - **Lifecycle tracking**: Load state, per-attempt load errors and
//!   back/forward availability, kept in step with engine callbacks
//! - **Request interception**: Every navigation is checked against a
//!   host-supplied policy that may allow, reject or rewrite it
//! - **Loop avoidance**: A rewritten navigation is reloaded exactly once and
//!   never re-evaluated
//!
//! # Core Types
//!
//! - [`NavigationController`]: Owns one view's state and decides on its navigations
//! - [`EngineEvent`]: Closed set of engine callbacks handled by the controller
//! - [`RequestInterceptor`]: Host policy returning an [`InterceptVerdict`]
//! - [`Engine`]: Receives [`Directive`]s from the controller
//! - [`LoadState`]: `Idle`, `Loading`, `Finished` or `Failed`
//!
//! # Examples
//!
//! ```
//! use webnav_core::{
//!     BlockList, LoadState, NavigationAction, NavigationController, NavigationDecision,
//!     RecordingEngine,
//! };
//!
//! let mut controller = NavigationController::builder("view-1")
//!     .interceptor(BlockList::new().block("http://"))
//!     .build();
//! let mut engine = RecordingEngine::new();
//!
//! controller.on_provisional_start(Some("http://insecure.example"));
//! let decision = controller.on_navigation_action(
//!     NavigationAction::main_frame("http://insecure.example"),
//!     &mut engine,
//! );
//!
//! assert_eq!(decision, NavigationDecision::Cancel);
//! assert_eq!(controller.load_state(), LoadState::Loading(0.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod config;
mod controller;
mod directive;
mod error;
mod event;
mod hook;
mod logging;
mod policy;
mod request;
mod state;

pub use config::{WebSettings, DEFAULT_ZOOM_LEVEL};
pub use controller::{ControllerBuilder, NavigationController};
pub use directive::{Directive, Engine, NavigationDecision, RecordingEngine};
pub use error::{Error, FaultKind, InterceptError, PolicyFault};
pub use event::EngineEvent;
pub use hook::{CommitHook, ViewportHook};
pub use policy::{AllowAll, BlockList, HeaderInjector, InterceptVerdict, RequestInterceptor};
pub use request::{
    Headers, ModifiedRequest, NavigationAction, PendingRequest, TargetFrame, DEFAULT_METHOD,
};
pub use state::{LoadState, NavCapabilities, RequestError, ViewSnapshot};
