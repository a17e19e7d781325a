use serde::{Deserialize, Serialize};

/// Default local hour of the daily fire time.
pub const DEFAULT_HOUR: u8 = 8;
/// Default local minute of the daily fire time.
pub const DEFAULT_MINUTE: u8 = 0;
/// Default notification headline.
pub const DEFAULT_TITLE: &str = "Wetterdeck Wetter";
/// Default notification detail text.
pub const DEFAULT_BODY: &str = "Tägliches Wetter-Update";
/// Body used by preview notifications when none is given.
pub const TEST_FIRE_BODY: &str = "Testbenachrichtigung";

/// User-consent state for showing desktop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Undecided; no prompt has resolved yet.
    #[default]
    Default,
    /// The user (or platform) allows notifications.
    Granted,
    /// Notifications are blocked or the platform cannot show them.
    Denied,
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Default => "default",
            Self::Granted => "granted",
            Self::Denied => "denied",
        };
        f.write_str(s)
    }
}

/// Persisted daily reminder settings.
///
/// Exactly one record of this type lives at the store's fixed path and
/// every write replaces it wholesale. Fields missing from the persisted
/// JSON fill in from their defaults on read; out-of-range values are
/// sanitized the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Whether the recurring reminder is currently armed.
    #[serde(default)]
    pub enabled: bool,
    /// Local wall-clock hour of the daily fire time (0-23).
    #[serde(default = "default_hour")]
    pub hour: u8,
    /// Local wall-clock minute of the daily fire time (0-59).
    #[serde(default = "default_minute")]
    pub minute: u8,
    /// Notification headline, never empty.
    #[serde(default = "default_title")]
    pub title: String,
    /// Notification detail text.
    #[serde(default = "default_body")]
    pub body: String,
}

fn default_hour() -> u8 {
    DEFAULT_HOUR
}

fn default_minute() -> u8 {
    DEFAULT_MINUTE
}

fn default_title() -> String {
    DEFAULT_TITLE.to_owned()
}

fn default_body() -> String {
    DEFAULT_BODY.to_owned()
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hour: default_hour(),
            minute: default_minute(),
            title: default_title(),
            body: default_body(),
        }
    }
}

impl ReminderConfig {
    /// The record `cancel()` persists: disabled, every other field reset.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Replace out-of-range or empty fields with their defaults.
    pub fn sanitize(mut self) -> Self {
        if self.hour > 23 {
            self.hour = DEFAULT_HOUR;
        }
        if self.minute > 59 {
            self.minute = DEFAULT_MINUTE;
        }
        if self.title.trim().is_empty() {
            self.title = default_title();
        }
        self
    }
}

/// Reminder subsystem errors.
///
/// These never cross the scheduler's public boundary; they exist for the
/// store and backend seams and are logged at the point of recovery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Notification backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ReminderConfig::default();
        assert!(!cfg.enabled);
        assert_eq!(cfg.hour, 8);
        assert_eq!(cfg.minute, 0);
        assert_eq!(cfg.title, "Wetterdeck Wetter");
        assert_eq!(cfg.body, "Tägliches Wetter-Update");
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let cfg: ReminderConfig = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
        assert!(cfg.enabled);
        assert_eq!(cfg.hour, DEFAULT_HOUR);
        assert_eq!(cfg.minute, DEFAULT_MINUTE);
        assert_eq!(cfg.title, DEFAULT_TITLE);
        assert_eq!(cfg.body, DEFAULT_BODY);
    }

    #[test]
    fn test_sanitize_out_of_range_time() {
        let cfg = ReminderConfig {
            hour: 99,
            minute: 77,
            ..ReminderConfig::default()
        }
        .sanitize();
        assert_eq!(cfg.hour, DEFAULT_HOUR);
        assert_eq!(cfg.minute, DEFAULT_MINUTE);
    }

    #[test]
    fn test_sanitize_empty_title() {
        let cfg = ReminderConfig {
            title: "  ".into(),
            ..ReminderConfig::default()
        }
        .sanitize();
        assert_eq!(cfg.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_sanitize_keeps_valid_fields() {
        let cfg = ReminderConfig {
            enabled: true,
            hour: 23,
            minute: 59,
            title: "Abendbericht".into(),
            body: String::new(),
        }
        .sanitize();
        assert_eq!(cfg.hour, 23);
        assert_eq!(cfg.minute, 59);
        assert_eq!(cfg.title, "Abendbericht");
        // an explicitly empty body is preserved, only an absent one defaults
        assert_eq!(cfg.body, "");
    }

    #[test]
    fn test_permission_state_display() {
        assert_eq!(PermissionState::Default.to_string(), "default");
        assert_eq!(PermissionState::Granted.to_string(), "granted");
        assert_eq!(PermissionState::Denied.to_string(), "denied");
    }
}
