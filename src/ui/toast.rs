//! Transient notifications.

use std::time::Duration;

use colored::Colorize;
use serde::Serialize;

/// Default time a toast stays visible.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// Zero means the toast stays until dismissed.
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// One coloured terminal line.
    pub fn render(&self) -> String {
        match self.kind {
            ToastKind::Success => format!("{} {}", "✓".green().bold(), self.message.green()),
            ToastKind::Error => format!("{} {}", "✗".red().bold(), self.message.red()),
            ToastKind::Warning => format!("{} {}", "!".yellow().bold(), self.message.yellow()),
            ToastKind::Info => format!("{} {}", "i".cyan().bold(), self.message),
        }
    }

    /// Print to the terminal: errors and warnings on stderr.
    pub fn show(&self) {
        match self.kind {
            ToastKind::Error | ToastKind::Warning => eprintln!("{}", self.render()),
            _ => println!("{}", self.render()),
        }
    }
}
