//! Platform notification capability.
//!
//! The consent model is tri-state: `default` until a decision resolves,
//! then `granted` or `denied`. Browsers prompt the user; the desktop
//! servers `notify-rust` talks to either accept notifications or are not
//! there at all, so the desktop backend probes once and caches the
//! outcome. An unsupported platform reads as `denied`, never as an error.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::types::{NotifyError, PermissionState};

/// Capability seam for consent queries and showing notifications.
///
/// Production code uses [`DesktopBackend`]; tests substitute their own
/// implementation to observe emissions without a desktop session.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Non-suspending query of the cached consent state.
    fn permission(&self) -> PermissionState;

    /// Resolve the consent state, prompting the user where the platform
    /// supports it. Idempotent: an already-decided state is returned
    /// without a new prompt.
    async fn request_permission(&self) -> PermissionState;

    /// Construct and show a notification.
    fn show(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Desktop implementation backed by the system notification service.
#[derive(Debug, Default)]
pub struct DesktopBackend {
    state: Mutex<Option<PermissionState>>,
}

impl DesktopBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn cached_or_probe(&self) -> PermissionState {
        let mut state = self.state.lock();
        if let Some(known) = *state {
            return known;
        }
        let probed = Self::probe();
        *state = Some(probed);
        probed
    }

    /// Ask the freedesktop notification server whether it is reachable.
    #[cfg(all(unix, not(target_os = "macos")))]
    fn probe() -> PermissionState {
        match notify_rust::get_capabilities() {
            Ok(caps) => {
                tracing::debug!("notification server capabilities: {caps:?}");
                PermissionState::Granted
            }
            Err(e) => {
                tracing::warn!("notification server unreachable: {e}");
                PermissionState::Denied
            }
        }
    }

    /// macOS and Windows show notifications without an explicit grant.
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn probe() -> PermissionState {
        PermissionState::Granted
    }
}

#[async_trait]
impl NotificationBackend for DesktopBackend {
    fn permission(&self) -> PermissionState {
        self.cached_or_probe()
    }

    async fn request_permission(&self) -> PermissionState {
        self.cached_or_probe()
    }

    fn show(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .icon("weather-few-clouds")
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Backend(e.to_string()))
    }
}
