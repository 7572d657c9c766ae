use std::fmt;

/// Per-view logging handle.
///
/// Owned by a [`NavigationController`](crate::NavigationController). Every
/// message carries the view identifier and the URL of the navigation in
/// progress, so interleaved output from several views can be told apart.
#[derive(Debug, Clone)]
pub struct NavLog {
    view_id: String,
    url: Option<String>,
}

impl NavLog {
    pub(crate) fn new(view_id: impl Into<String>) -> Self {
        Self {
            view_id: view_id.into(),
            url: None,
        }
    }

    /// Returns the view identifier associated with this logger.
    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    /// URL stamped on subsequent messages, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Follows the navigation the view is currently on.
    pub(crate) fn set_url(&mut self, url: Option<&str>) {
        self.url = url.map(str::to_string);
    }

    fn url_field(&self) -> &str {
        self.url.as_deref().unwrap_or("-")
    }

    /// Logs an info-level message with the view ID and current URL.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(view_id = %self.view_id, url = self.url_field(), "{}", args);
    }

    /// Logs a warning-level message with the view ID and current URL.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(view_id = %self.view_id, url = self.url_field(), "{}", args);
    }

    /// Logs an error-level message with the view ID and current URL.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(view_id = %self.view_id, url = self.url_field(), "{}", args);
    }

    /// Logs a debug-level message with the view ID and current URL.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(view_id = %self.view_id, url = self.url_field(), "{}", args);
    }
}
