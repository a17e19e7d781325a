use std::path::{Path, PathBuf};

use crate::types::{NotifyError, ReminderConfig};

/// File name of the singleton reminder record inside the config directory.
const STORE_FILE: &str = "daily_notification.json";

/// Read/write access to the persisted [`ReminderConfig`].
///
/// Reads never fail: a missing, unreadable or malformed record yields the
/// documented defaults. Writes replace the record wholesale; there is no
/// partial merge.
#[derive(Debug, Clone)]
pub struct ReminderStore {
    path: PathBuf,
}

impl ReminderStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(STORE_FILE),
        }
    }

    /// Read the persisted record, falling back to defaults field by field.
    pub fn read(&self) -> ReminderConfig {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no reminder record at {}", self.path.display());
                return ReminderConfig::default();
            }
            Err(e) => {
                tracing::warn!("cannot read reminder record: {e}");
                return ReminderConfig::default();
            }
        };

        match serde_json::from_slice::<ReminderConfig>(&bytes) {
            Ok(cfg) => cfg.sanitize(),
            Err(e) => {
                tracing::warn!("malformed reminder record, using defaults: {e}");
                ReminderConfig::default()
            }
        }
    }

    /// Replace the persisted record wholesale.
    pub fn write(&self, cfg: &ReminderConfig) -> Result<(), NotifyError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        std::fs::write(&self.path, json)?;

        Ok(())
    }

    /// Convenience projection of `read().enabled`.
    pub fn is_enabled(&self) -> bool {
        self.read().enabled
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::types::{DEFAULT_HOUR, DEFAULT_TITLE};
    use tempfile::tempdir;

    #[test]
    fn test_missing_record_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = ReminderStore::new(dir.path());

        let cfg = store.read();
        assert_eq!(cfg, ReminderConfig::default());
        assert!(!store.is_enabled());
    }

    #[test]
    fn test_malformed_record_yields_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(STORE_FILE), "{not json").unwrap();

        let store = ReminderStore::new(dir.path());
        assert_eq!(store.read(), ReminderConfig::default());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let store = ReminderStore::new(dir.path());

        let cfg = ReminderConfig {
            enabled: true,
            hour: 6,
            minute: 30,
            title: "Morgenwetter".into(),
            body: "Aufstehen!".into(),
        };
        store.write(&cfg).unwrap();

        assert_eq!(store.read(), cfg);
        assert!(store.is_enabled());
    }

    #[test]
    fn test_out_of_range_fields_are_sanitized_on_read() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(STORE_FILE),
            r#"{"enabled":true,"hour":99,"minute":61,"title":"","body":"b"}"#,
        )
        .unwrap();

        let store = ReminderStore::new(dir.path());
        let cfg = store.read();
        assert!(cfg.enabled);
        assert_eq!(cfg.hour, DEFAULT_HOUR);
        assert_eq!(cfg.minute, 0);
        assert_eq!(cfg.title, DEFAULT_TITLE);
        assert_eq!(cfg.body, "b");
    }

    #[test]
    fn test_disabled_write_drops_other_fields() {
        let dir = tempdir().unwrap();
        let store = ReminderStore::new(dir.path());

        store
            .write(&ReminderConfig {
                enabled: true,
                hour: 21,
                minute: 15,
                title: "Abend".into(),
                body: "Update".into(),
            })
            .unwrap();
        store.write(&ReminderConfig::disabled()).unwrap();

        let cfg = store.read();
        assert!(!cfg.enabled);
        assert_eq!(cfg.hour, DEFAULT_HOUR);
        assert_eq!(cfg.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_write_creates_config_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("deep").join("wetterdeck");
        let store = ReminderStore::new(&nested);

        store.write(&ReminderConfig::default()).unwrap();
        assert!(nested.join(STORE_FILE).exists());
    }
}
