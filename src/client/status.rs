use std::time::{Duration, Instant};

/// Success messages disappear on their own after this long.
pub const SUCCESS_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: Instant,
}

/// The one user-facing message currently on screen.
///
/// Showing a message replaces the previous one. Errors stay until replaced or
/// dismissed.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    current: Option<StatusMessage>,
    success_ttl: Duration,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self {
            current: None,
            success_ttl: SUCCESS_TTL,
        }
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_success_ttl(mut self, ttl: Duration) -> Self {
        self.success_ttl = ttl;
        self
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Success, text.into(), Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Error, text.into(), Instant::now());
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&StatusMessage> {
        self.current.as_ref().filter(|message| match message.kind {
            StatusKind::Success => now.saturating_duration_since(message.shown_at) < self.success_ttl,
            StatusKind::Error => true,
        })
    }

    fn show(&mut self, kind: StatusKind, text: String, at: Instant) {
        match kind {
            StatusKind::Success => log::info!("{}", text),
            StatusKind::Error => log::warn!("{}", text),
        }
        self.current = Some(StatusMessage {
            kind,
            text,
            shown_at: at,
        });
    }
}
