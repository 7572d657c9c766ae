use std::any::Any;
use std::fmt;

/// Errors returned by host-facing operations of this crate.
///
/// None of these ever cross the engine boundary: the engine always
/// receives a definite [`NavigationDecision`](crate::NavigationDecision).
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A navigation directive was issued while its capability flag is off
    DirectiveUnavailable {
        /// Name of the refused directive
        directive: &'static str,
    },
    /// A configuration value was rejected
    InvalidSetting {
        /// Name of the offending setting
        setting: &'static str,
        /// Human-readable reason
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DirectiveUnavailable { directive } => {
                write!(f, "Directive '{}' is not currently available", directive)
            }
            Error::InvalidSetting { setting, reason } => {
                write!(f, "Invalid setting '{}': {}", setting, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

/// A failure raised while an interception policy evaluated a request.
///
/// The controller treats every fault as a rejection and reports it to the
/// host through
/// [`NavigationController::intercept_errors`](crate::NavigationController::intercept_errors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyFault {
    /// The kind of fault
    pub kind: FaultKind,
    /// Human-readable message explaining the fault
    pub message: String,
}

impl PolicyFault {
    /// Creates a new fault.
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a [`FaultKind::Failed`] fault.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Failed, message)
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = panic_message(payload).unwrap_or_else(|| "policy panicked".to_string());
        Self::new(FaultKind::Panicked, message)
    }
}

impl fmt::Display for PolicyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for PolicyFault {}

/// Text of a `panic!` payload, if it carried one.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Some((*s).to_string())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}

/// The kind of policy fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The policy returned an error
    Failed,
    /// The policy panicked during evaluation
    Panicked,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::Failed => write!(f, "Failed"),
            FaultKind::Panicked => write!(f, "Panicked"),
        }
    }
}

/// A policy fault tied to the URL whose evaluation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptError {
    /// URL of the navigation that was being evaluated
    pub url: String,
    /// The underlying fault
    pub fault: PolicyFault,
}

impl fmt::Display for InterceptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interception of {} failed ({})", self.url, self.fault)
    }
}

impl std::error::Error for InterceptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.fault)
    }
}
