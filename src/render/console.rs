use crate::form::FormView;
use std::io::Write;

/// Terminal rendering of the form's widgets.
///
/// Flags mirror what a page would show; output goes to the supplied writer
/// (stderr in the binary).
pub struct ConsoleView<W: Write> {
    out: W,
    submit_enabled: bool,
    loading_visible: bool,
    error: Option<String>,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            submit_enabled: true,
            loading_visible: false,
            error: None,
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn loading_visible(&self) -> bool {
        self.loading_visible
    }

    /// Text of the error element while it is visible.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Terminal writes are best-effort; a closed stderr must not fail the submit.
impl<W: Write> FormView for ConsoleView<W> {
    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_loading_visible(&mut self, visible: bool) {
        if visible && !self.loading_visible {
            let _ = writeln!(self.out, "⏳ Analyzing…");
        }
        self.loading_visible = visible;
    }

    fn show_error(&mut self, message: &str) {
        let _ = writeln!(self.out, "✖ {}", message);
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_flags_and_prints() {
        let mut view = ConsoleView::new(Vec::new());
        assert!(view.submit_enabled());

        view.set_submit_enabled(false);
        view.set_loading_visible(true);
        view.set_loading_visible(true);
        view.show_error("Invalid ticker");
        assert!(!view.submit_enabled());
        assert!(view.loading_visible());
        assert_eq!(view.error(), Some("Invalid ticker"));

        view.hide_error();
        assert_eq!(view.error(), None);

        let printed = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(printed, "⏳ Analyzing…\n✖ Invalid ticker\n");
    }
}
