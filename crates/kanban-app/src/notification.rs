use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Number of past notifications kept for inspection.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip)]
    pub shown_at: Instant,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Single-slot status surface.
///
/// A new message replaces the visible one and restarts its timer. Every
/// message is also kept in `history`, up to [`HISTORY_LIMIT`] entries, so
/// adapters and tests can inspect what was reported.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notification>,
    history: VecDeque<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show_at(NotificationKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show_at(NotificationKind::Error, message, Instant::now());
    }

    pub fn show_at(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        let notification = Notification {
            kind,
            message: message.into(),
            shown_at: now,
        };
        match kind {
            NotificationKind::Success => tracing::info!("{}", notification.message),
            NotificationKind::Error => tracing::warn!("{}", notification.message),
        }
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(notification.clone());
        self.current = Some(notification);
    }

    /// The notification still on screen at `now`, if any.
    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < NOTIFICATION_TIMEOUT)
    }

    pub fn visible(&self) -> Option<&Notification> {
        self.visible_at(Instant::now())
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Oldest first.
    pub fn history(&self) -> &VecDeque<Notification> {
        &self.history
    }

    pub fn error_count(&self) -> usize {
        self.history.iter().filter(|n| n.is_error()).count()
    }
}
