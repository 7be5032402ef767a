use chrono::Local;
use tracing::{info, warn};

/// How serious a status line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// The page's debug/status text region: the single sink every error and
/// diagnostic is reported to. Each report is mirrored to `tracing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusArea {
    text: Option<String>,
    level: Option<StatusLevel>,
}

impl StatusArea {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the status line with a time-stamped informational message.
    pub fn info(&mut self, message: &str) {
        info!(status = %message);
        self.set(StatusLevel::Info, message);
    }

    /// Replace the status line with a time-stamped error message.
    pub fn error(&mut self, message: &str) {
        warn!(status = %message);
        self.set(StatusLevel::Error, message);
    }

    fn set(&mut self, level: StatusLevel, message: &str) {
        let stamp = Local::now().format("%H:%M:%S");
        self.text = Some(format!("{stamp} — {message}"));
        self.level = Some(level);
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn level(&self) -> Option<StatusLevel> {
        self.level
    }

    /// Message without its time stamp.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(|t| t.split_once(" — ").map_or(t, |(_, rest)| rest))
    }
}
