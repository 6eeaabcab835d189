use tasklink_protocol::StatusLine;
use tracing::info;

/// One-line status bar at the bottom of every screen.
#[derive(Debug, Default)]
pub struct StatusBar {
    text: Option<String>,
    history: Vec<String>,
    hides: usize,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Every text shown, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Number of `hide` calls, i.e. finished loads.
    pub fn hides(&self) -> usize {
        self.hides
    }
}

impl StatusLine for StatusBar {
    fn show(&mut self, text: &str) {
        info!(status = text, "status bar");
        self.text = Some(text.to_owned());
        self.history.push(text.to_owned());
    }

    fn hide(&mut self) {
        self.text = None;
        self.hides += 1;
    }
}
