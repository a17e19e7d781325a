//! Daily weather reminder service for Wetterdeck
//!
//! Owns the persisted reminder record and the runtime timer pair that
//! fires a desktop notification once per day at the configured local
//! time. Timers live for the current session only; call
//! [`ReminderScheduler::restore_from_storage`] once at session start to
//! re-arm them from the persisted record.

pub mod backend;
pub mod emitter;
pub mod scheduler;
pub mod store;
pub mod types;

pub use backend::{DesktopBackend, NotificationBackend};
pub use emitter::NotificationEmitter;
pub use scheduler::ReminderScheduler;
pub use store::ReminderStore;
pub use types::{NotifyError, PermissionState, ReminderConfig};
