//! Interception policies.
//!
//! A policy is a host-supplied decision function consulted for every
//! intercepted navigation. It must not block indefinitely: the engine holds
//! the navigation open until a verdict is produced.

use std::panic::{self, AssertUnwindSafe};

use crate::error::PolicyFault;
use crate::request::{ModifiedRequest, PendingRequest};

/// Outcome of evaluating a [`PendingRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptVerdict {
    /// Let the navigation proceed unchanged
    Allow,
    /// Cancel the navigation
    Reject,
    /// Cancel the navigation and load the replacement instead
    Modify(ModifiedRequest),
}

/// A host-supplied interception policy.
///
/// Implemented for any `Fn(&PendingRequest) -> Result<InterceptVerdict, PolicyFault>`.
///
/// # Examples
///
/// ```
/// use webnav_core::{InterceptVerdict, PendingRequest, PolicyFault, RequestInterceptor};
///
/// let only_https = |req: &PendingRequest| -> Result<InterceptVerdict, PolicyFault> {
///     if req.url().starts_with("https://") {
///         Ok(InterceptVerdict::Allow)
///     } else {
///         Ok(InterceptVerdict::Reject)
///     }
/// };
/// # let _: &dyn RequestInterceptor = &only_https;
/// ```
pub trait RequestInterceptor {
    /// Decides what to do with `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyFault`] when the policy cannot reach a verdict.
    /// The controller then cancels the navigation.
    fn intercept(&self, request: &PendingRequest) -> Result<InterceptVerdict, PolicyFault>;
}

impl<F> RequestInterceptor for F
where
    F: Fn(&PendingRequest) -> Result<InterceptVerdict, PolicyFault>,
{
    fn intercept(&self, request: &PendingRequest) -> Result<InterceptVerdict, PolicyFault> {
        self(request)
    }
}

/// Runs `interceptor`, converting a panic into a [`PolicyFault`].
pub(crate) fn evaluate(
    interceptor: &dyn RequestInterceptor,
    request: &PendingRequest,
) -> Result<InterceptVerdict, PolicyFault> {
    panic::catch_unwind(AssertUnwindSafe(|| interceptor.intercept(request)))
        .unwrap_or_else(|payload| Err(PolicyFault::from_panic(payload.as_ref())))
}

/// Policy that allows every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl RequestInterceptor for AllowAll {
    fn intercept(&self, _request: &PendingRequest) -> Result<InterceptVerdict, PolicyFault> {
        Ok(InterceptVerdict::Allow)
    }
}

/// Policy that rejects any URL starting with one of its prefixes.
///
/// # Examples
///
/// ```
/// use webnav_core::BlockList;
///
/// let policy = BlockList::new()
///     .block("http://")
///     .block("https://ads.example.com/");
/// assert_eq!(policy.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlockList {
    prefixes: Vec<String>,
}

impl BlockList {
    /// Creates an empty block list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a blocked URL prefix. Duplicates are ignored.
    pub fn block(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
        self
    }

    /// Number of blocked prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns true if nothing is blocked.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Returns true if `url` matches a blocked prefix.
    pub fn is_blocked(&self, url: &str) -> bool {
        self.prefixes.iter().any(|p| url.starts_with(p.as_str()))
    }
}

impl RequestInterceptor for BlockList {
    fn intercept(&self, request: &PendingRequest) -> Result<InterceptVerdict, PolicyFault> {
        if self.is_blocked(request.url()) {
            Ok(InterceptVerdict::Reject)
        } else {
            Ok(InterceptVerdict::Allow)
        }
    }
}

/// Policy that reloads main-frame requests missing a header with the header added.
///
/// Requests that already carry the header, and requests not explicitly
/// targeting the main frame, are allowed unchanged.
#[derive(Debug, Clone)]
pub struct HeaderInjector {
    name: String,
    value: String,
}

impl HeaderInjector {
    /// Creates an injector for the `name: value` header.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl RequestInterceptor for HeaderInjector {
    fn intercept(&self, request: &PendingRequest) -> Result<InterceptVerdict, PolicyFault> {
        if !request.is_for_main_frame() || request.header(&self.name).is_some() {
            return Ok(InterceptVerdict::Allow);
        }
        let modified =
            ModifiedRequest::from(request).with_header(self.name.clone(), self.value.clone());
        Ok(InterceptVerdict::Modify(modified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Headers, TargetFrame};
    use crate::FaultKind;

    fn request(url: &str, target: TargetFrame) -> PendingRequest {
        PendingRequest::new(url.to_string(), Headers::new(), None, target, false)
    }

    #[test]
    fn allow_all_allows() {
        let verdict = AllowAll.intercept(&request("https://a", TargetFrame::Main));
        assert_eq!(verdict, Ok(InterceptVerdict::Allow));
    }

    #[test]
    fn block_list_matches_prefix() {
        let policy = BlockList::new().block("http://").block("http://");
        assert_eq!(policy.len(), 1);
        assert_eq!(
            policy.intercept(&request("http://plain", TargetFrame::Main)),
            Ok(InterceptVerdict::Reject)
        );
        assert_eq!(
            policy.intercept(&request("https://secure", TargetFrame::Main)),
            Ok(InterceptVerdict::Allow)
        );
    }

    #[test]
    fn header_injector_modifies_once() {
        let policy = HeaderInjector::new("X-Client", "webnav");
        let verdict = policy
            .intercept(&request("https://a", TargetFrame::Main))
            .unwrap();
        let InterceptVerdict::Modify(modified) = verdict else {
            panic!("expected Modify");
        };
        assert_eq!(modified.url, "https://a");
        assert_eq!(modified.headers["X-Client"], "webnav");

        let mut headers = Headers::new();
        headers.insert("X-Client".to_string(), "webnav".to_string());
        let already = PendingRequest::new(
            "https://a".to_string(),
            headers,
            None,
            TargetFrame::Main,
            false,
        );
        assert_eq!(policy.intercept(&already), Ok(InterceptVerdict::Allow));
    }

    #[test]
    fn header_injector_ignores_unknown_target() {
        let policy = HeaderInjector::new("X-Client", "webnav");
        assert_eq!(
            policy.intercept(&request("https://a", TargetFrame::Unknown)),
            Ok(InterceptVerdict::Allow)
        );
    }

    #[test]
    fn closures_are_policies() {
        let policy = |req: &PendingRequest| -> Result<InterceptVerdict, PolicyFault> {
            if req.url().contains("evil") {
                Err(PolicyFault::failed("cannot classify"))
            } else {
                Ok(InterceptVerdict::Allow)
            }
        };
        assert!(evaluate(&policy, &request("https://evil", TargetFrame::Main)).is_err());
        assert!(evaluate(&policy, &request("https://good", TargetFrame::Main)).is_ok());
    }

    #[test]
    fn evaluate_catches_panics() {
        let policy = |_: &PendingRequest| -> Result<InterceptVerdict, PolicyFault> {
            panic!("rule engine crashed")
        };
        let fault = evaluate(&policy, &request("https://a", TargetFrame::Main)).unwrap_err();
        assert_eq!(fault.kind, FaultKind::Panicked);
        assert_eq!(fault.message, "rule engine crashed");
    }
}
