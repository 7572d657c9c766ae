use std::collections::BTreeMap;

/// Header name to value mapping. Names are unique.
pub type Headers = BTreeMap<String, String>;

/// Method reported when the engine does not carry one.
pub const DEFAULT_METHOD: &str = "GET";

/// Which frame a navigation action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetFrame {
    /// The top-level document of the view
    Main,
    /// An embedded sub-document (iframe)
    Subframe,
    /// The engine did not report a target frame
    #[default]
    Unknown,
}

impl TargetFrame {
    /// Maps the engine's optional "is main frame" flag.
    pub fn from_main_flag(is_main: Option<bool>) -> Self {
        match is_main {
            Some(true) => TargetFrame::Main,
            Some(false) => TargetFrame::Subframe,
            None => TargetFrame::Unknown,
        }
    }
}

/// A navigation the engine is about to perform, as reported to the controller.
///
/// Unlike [`PendingRequest`], every field is optional: engine-internal
/// navigations may carry no URL and no method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationAction {
    /// Target URL, if the engine could resolve one
    pub url: Option<String>,
    /// Request headers as sent by the engine
    pub headers: Headers,
    /// HTTP method, if reported
    pub method: Option<String>,
    /// Frame the navigation targets
    pub target: TargetFrame,
}

impl NavigationAction {
    /// Creates a main-frame action for `url` with no headers.
    pub fn main_frame(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            target: TargetFrame::Main,
            ..Self::default()
        }
    }

    /// Creates a sub-frame action for `url` with no headers.
    pub fn subframe(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            target: TargetFrame::Subframe,
            ..Self::default()
        }
    }

    /// Sets the target frame.
    pub fn with_target(mut self, target: TargetFrame) -> Self {
        self.target = target;
        self
    }

    /// Adds a header, replacing any previous value for the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the HTTP method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// A request handed to the interception policy.
///
/// Built fresh for each navigation action and never mutated afterwards;
/// fields are private so a policy can only read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    url: String,
    headers: Headers,
    method: String,
    is_for_main_frame: bool,
    is_redirect: bool,
}

impl PendingRequest {
    pub(crate) fn new(
        url: String,
        headers: Headers,
        method: Option<String>,
        target: TargetFrame,
        is_redirect: bool,
    ) -> Self {
        Self {
            url,
            headers,
            method: method.unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            is_for_main_frame: target == TargetFrame::Main,
            is_redirect,
        }
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers, copied verbatim from the engine.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Looks up a header value by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// HTTP method (`GET` when the engine reported none).
    pub fn method(&self) -> &str {
        &self.method
    }

    /// True only when the engine explicitly targeted the main frame.
    pub fn is_for_main_frame(&self) -> bool {
        self.is_for_main_frame
    }

    /// Reserved; currently always false.
    ///
    /// The suppression flag is consumed before any request is built, so a
    /// controller-issued reload never reaches the policy.
    pub fn is_redirect(&self) -> bool {
        self.is_redirect
    }
}

/// Replacement request returned by a policy in a `Modify` verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifiedRequest {
    /// URL to load instead
    pub url: String,
    /// Headers to send with the new load
    pub headers: Headers,
}

impl ModifiedRequest {
    /// Creates a replacement for `url` with no headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Headers::new(),
        }
    }

    /// Adds a header to the replacement.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl From<&PendingRequest> for ModifiedRequest {
    fn from(request: &PendingRequest) -> Self {
        Self {
            url: request.url.clone(),
            headers: request.headers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_frame_from_flag() {
        assert_eq!(TargetFrame::from_main_flag(Some(true)), TargetFrame::Main);
        assert_eq!(
            TargetFrame::from_main_flag(Some(false)),
            TargetFrame::Subframe
        );
        assert_eq!(TargetFrame::from_main_flag(None), TargetFrame::Unknown);
    }

    #[test]
    fn pending_request_defaults_method_to_get() {
        let req = PendingRequest::new(
            "https://a".to_string(),
            Headers::new(),
            None,
            TargetFrame::Main,
            false,
        );
        assert_eq!(req.method(), "GET");
        assert!(req.is_for_main_frame());
        assert!(!req.is_redirect());
    }

    #[test]
    fn unknown_target_is_not_main_frame() {
        let req = PendingRequest::new(
            "https://a".to_string(),
            Headers::new(),
            Some("POST".to_string()),
            TargetFrame::Unknown,
            false,
        );
        assert_eq!(req.method(), "POST");
        assert!(!req.is_for_main_frame());
    }

    #[test]
    fn action_builder_keeps_unique_headers() {
        let action = NavigationAction::main_frame("https://a")
            .with_header("Accept", "text/html")
            .with_header("Accept", "*/*");
        assert_eq!(action.headers.len(), 1);
        assert_eq!(action.headers["Accept"], "*/*");
    }

    #[test]
    fn modified_request_from_pending_copies_headers() {
        let mut headers = Headers::new();
        headers.insert("X-Token".to_string(), "t".to_string());
        let req = PendingRequest::new(
            "https://a".to_string(),
            headers,
            None,
            TargetFrame::Main,
            false,
        );
        let modified = ModifiedRequest::from(&req).with_header("X-Extra", "1");
        assert_eq!(modified.url, "https://a");
        assert_eq!(modified.headers.len(), 2);
    }
}
