use crate::error::Error;

/// Zoom level applied when none is configured.
pub const DEFAULT_ZOOM_LEVEL: f64 = 1.0;

/// Display settings for a view.
///
/// Consumed by the viewport hook at commit time.
///
/// # Examples
///
/// ```
/// use webnav_core::WebSettings;
///
/// let settings = WebSettings::new()
///     .with_support_zoom(false)
///     .with_zoom_level(1.5)
///     .expect("valid zoom level");
/// assert_eq!(settings.zoom_level(), 1.5);
/// assert!(!settings.support_zoom());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebSettings {
    support_zoom: bool,
    zoom_level: f64,
}

impl WebSettings {
    /// Creates settings with zoom enabled at the default level.
    pub fn new() -> Self {
        Self {
            support_zoom: true,
            zoom_level: DEFAULT_ZOOM_LEVEL,
        }
    }

    /// Enables or disables user zooming.
    pub fn with_support_zoom(mut self, support_zoom: bool) -> Self {
        self.support_zoom = support_zoom;
        self
    }

    /// Sets the initial zoom level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if `level` is not a finite positive number.
    pub fn with_zoom_level(mut self, level: f64) -> Result<Self, Error> {
        if !level.is_finite() || level <= 0.0 {
            return Err(Error::InvalidSetting {
                setting: "zoom_level",
                reason: format!("expected a finite positive number, got {}", level),
            });
        }
        self.zoom_level = level;
        Ok(self)
    }

    /// Whether the user may zoom.
    pub fn support_zoom(&self) -> bool {
        self.support_zoom
    }

    /// Initial zoom level.
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = WebSettings::default();
        assert!(settings.support_zoom());
        assert_eq!(settings.zoom_level(), DEFAULT_ZOOM_LEVEL);
    }

    #[test]
    fn rejects_bad_zoom_levels() {
        for level in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = WebSettings::new().with_zoom_level(level);
            assert!(
                matches!(result, Err(Error::InvalidSetting { setting: "zoom_level", .. })),
                "level {} should be rejected",
                level
            );
        }
    }
}
