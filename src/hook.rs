//! One-shot page adjustments run when a navigation commits.

use crate::config::WebSettings;
use crate::directive::{Directive, Engine};

/// Side effect run once per committed navigation.
///
/// Hooks are fire-and-forget: they receive the engine, may dispatch
/// directives, and cannot influence the load state.
pub trait CommitHook {
    /// Called when the engine reports a commit.
    fn on_commit(&self, engine: &mut dyn Engine);
}

impl<F> CommitHook for F
where
    F: Fn(&mut dyn Engine),
{
    fn on_commit(&self, engine: &mut dyn Engine) {
        self(engine)
    }
}

/// Injects a `<meta name="viewport">` tag matching the view's [`WebSettings`].
#[derive(Debug, Clone, Copy)]
pub struct ViewportHook {
    settings: WebSettings,
}

impl ViewportHook {
    /// Creates a hook for `settings`.
    pub fn new(settings: WebSettings) -> Self {
        Self { settings }
    }

    /// The script dispatched on commit.
    pub fn script(&self) -> String {
        let user_scalable = if self.settings.support_zoom() {
            "yes"
        } else {
            "no"
        };
        format!(
            "var meta = document.createElement('meta');\
             meta.setAttribute('name', 'viewport');\
             meta.setAttribute('content', 'width=device-width, initial-scale={}, \
             maximum-scale=10.0, minimum-scale=0.1, user-scalable={}');\
             document.getElementsByTagName('head')[0].appendChild(meta);",
            self.settings.zoom_level(),
            user_scalable
        )
    }
}

impl CommitHook for ViewportHook {
    fn on_commit(&self, engine: &mut dyn Engine) {
        engine.dispatch(Directive::EvaluateScript(self.script()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::RecordingEngine;

    #[test]
    fn viewport_script_reflects_settings() {
        let settings = WebSettings::new()
            .with_support_zoom(false)
            .with_zoom_level(2.0)
            .unwrap();
        let script = ViewportHook::new(settings).script();

        assert!(script.contains("initial-scale=2"));
        assert!(script.contains("user-scalable=no"));
        assert!(script.contains("maximum-scale=10.0"));
    }

    #[test]
    fn viewport_hook_dispatches_one_script() {
        let mut engine = RecordingEngine::new();
        ViewportHook::new(WebSettings::default()).on_commit(&mut engine);

        assert_eq!(engine.len(), 1);
        assert!(matches!(
            &engine.directives()[0],
            Directive::EvaluateScript(s) if s.contains("user-scalable=yes")
        ));
    }

    #[test]
    fn closures_are_hooks() {
        let hook = |engine: &mut dyn Engine| engine.dispatch(Directive::Reload);
        let mut engine = RecordingEngine::new();
        hook.on_commit(&mut engine);
        assert_eq!(engine.directives(), &[Directive::Reload]);
    }
}
