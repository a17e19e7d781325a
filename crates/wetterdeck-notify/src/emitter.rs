use std::sync::Arc;

use crate::backend::NotificationBackend;
use crate::types::{PermissionState, DEFAULT_TITLE, TEST_FIRE_BODY};

/// Best-effort notification emission, gated on consent.
#[derive(Clone)]
pub struct NotificationEmitter {
    backend: Arc<dyn NotificationBackend>,
}

impl NotificationEmitter {
    pub fn new(backend: Arc<dyn NotificationBackend>) -> Self {
        Self { backend }
    }

    /// Show a notification if permission is currently granted.
    ///
    /// A missing grant is a silent miss, not an error; a user who revoked
    /// consent mid-session gets no crash, just no notification. Platform
    /// failures are logged and never propagated.
    pub fn emit(&self, title: &str, body: &str) {
        if self.backend.permission() != PermissionState::Granted {
            tracing::debug!("notification suppressed, permission not granted");
            return;
        }

        if let Err(e) = self.backend.show(title, body) {
            tracing::warn!("failed to show notification: {e}");
        }
    }

    /// Immediate preview notification, bypassing the schedule engine.
    pub fn test_fire(&self, title: Option<&str>, body: Option<&str>) {
        self.emit(title.unwrap_or(DEFAULT_TITLE), body.unwrap_or(TEST_FIRE_BODY));
    }
}
