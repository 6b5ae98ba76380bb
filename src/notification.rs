//! Transient notifications pushed to the host UI

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Debris inside the critical band
    CriticalProximity,
    /// Debris inside the warning band
    WarningProximity,
    /// Debris inside the collision threshold
    Collision,
    /// Elevated solar radiation reported by the environment feed
    SolarActivity,
    /// Acknowledgement of a user action (pause, speed change, reset)
    Info,
}

impl NotificationKind {
    /// How long the host should keep the notification on screen (milliseconds)
    pub fn display_ms(&self) -> u64 {
        match self {
            NotificationKind::CriticalProximity => 10_000,
            NotificationKind::WarningProximity => 8_000,
            NotificationKind::Collision | NotificationKind::SolarActivity => 3_000,
            NotificationKind::Info => 2_000,
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            NotificationKind::CriticalProximity
                | NotificationKind::WarningProximity
                | NotificationKind::Collision
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: Some(message.into()),
        }
    }

    /// Title-only informational notification
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            message: None,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.title, message),
            None => f.write_str(&self.title),
        }
    }
}

/// Receives notifications for display
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Writes notifications to the log instead of a UI
#[derive(Debug, Default)]
pub struct LogSink {
    pub delivered: u64,
}

impl NotificationSink for LogSink {
    fn notify(&mut self, notification: Notification) {
        self.delivered += 1;
        if notification.kind.is_alert() {
            tracing::warn!("{}", notification);
        } else {
            tracing::info!("{}", notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationKind::Collision, "COLLISION DETECTED", "Impact with space debris!");
        assert_eq!(n.to_string(), "COLLISION DETECTED: Impact with space debris!");
        assert_eq!(Notification::info("Simulation Paused").to_string(), "Simulation Paused");
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<Notification> = Vec::new();
        sink.notify(Notification::info("a"));
        sink.notify(Notification::info("b"));
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_log_sink_counts() {
        let mut sink = LogSink::default();
        sink.notify(Notification::info("hello"));
        assert_eq!(sink.delivered, 1);
    }

    #[test]
    fn test_alert_kinds() {
        assert!(NotificationKind::Collision.is_alert());
        assert!(!NotificationKind::SolarActivity.is_alert());
        assert_eq!(NotificationKind::CriticalProximity.display_ms(), 10_000);
    }
}
