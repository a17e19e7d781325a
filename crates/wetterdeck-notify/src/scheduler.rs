//! The daily reminder schedule engine.
//!
//! Owns the one-shot + recurring timer pair and keeps it consistent with
//! the persisted reminder record. Two states: Idle (no timers) and Armed
//! (one-shot waiting for the next fire time, then a 24h recurring timer).
//! Every public operation is infallible at the boundary; recoverable
//! failures are logged.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, LocalResult, NaiveTime};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::backend::NotificationBackend;
use crate::emitter::NotificationEmitter;
use crate::store::ReminderStore;
use crate::types::{PermissionState, ReminderConfig};

/// Period of the recurring timer.
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// The runtime timer pair. At most one of each is live at any time.
#[derive(Default)]
struct TimerHandles {
    /// Bumped on every schedule/cancel; pins a one-shot task to the
    /// registration it belongs to so a late recurring arm from a
    /// superseded registration cannot survive.
    epoch: u64,
    one_shot: Option<JoinHandle<()>>,
    recurring: Option<JoinHandle<()>>,
}

impl TimerHandles {
    fn clear(&mut self) {
        if let Some(handle) = self.one_shot.take() {
            handle.abort();
        }
        if let Some(handle) = self.recurring.take() {
            handle.abort();
        }
    }
}

/// Process-wide daily reminder scheduler.
///
/// Construct one instance at application start; it exclusively owns the
/// timer handles and the persisted record (via [`ReminderStore`]). Call
/// [`restore_from_storage`](Self::restore_from_storage) once per session.
/// Dropping the scheduler aborts any live timers.
pub struct ReminderScheduler {
    store: ReminderStore,
    emitter: NotificationEmitter,
    backend: Arc<dyn NotificationBackend>,
    timers: Arc<Mutex<TimerHandles>>,
}

impl ReminderScheduler {
    pub fn new(config_dir: &Path, backend: Arc<dyn NotificationBackend>) -> Self {
        Self {
            store: ReminderStore::new(config_dir),
            emitter: NotificationEmitter::new(Arc::clone(&backend)),
            backend,
            timers: Arc::new(Mutex::new(TimerHandles::default())),
        }
    }

    /// Arm the daily reminder at `hour:minute` local time.
    ///
    /// Cancels any previously armed timer pair first, so repeated calls
    /// never stack timers; the last caller wins. Title and body are
    /// captured now and reused for every subsequent fire until the next
    /// schedule call, even if the persisted record changes in between.
    pub fn schedule(&self, hour: u8, minute: u8, title: &str, body: &str) {
        let cfg = ReminderConfig {
            enabled: true,
            hour,
            minute,
            title: title.to_owned(),
            body: body.to_owned(),
        }
        .sanitize();

        if let Err(e) = self.store.write(&cfg) {
            tracing::warn!("cannot persist reminder record: {e}");
        }

        let delay = delay_until_next(Local::now(), cfg.hour, cfg.minute);
        tracing::info!(
            "daily reminder armed for {:02}:{:02}, first fire in {}s",
            cfg.hour,
            cfg.minute,
            delay.as_secs()
        );

        let timers = Arc::clone(&self.timers);
        let emitter = self.emitter.clone();

        // clear, bump and re-arm under one lock so a competing call can
        // never observe a half-replaced pair
        let mut guard = self.timers.lock();
        guard.clear();
        guard.epoch += 1;
        let epoch = guard.epoch;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            emitter.emit(&cfg.title, &cfg.body);

            let recurring_emitter = emitter.clone();
            let recurring = tokio::spawn(async move {
                let start = tokio::time::Instant::now() + DAY;
                let mut ticker = tokio::time::interval_at(start, DAY);
                loop {
                    ticker.tick().await;
                    recurring_emitter.emit(&cfg.title, &cfg.body);
                }
            });

            let mut guard = timers.lock();
            if guard.epoch == epoch {
                guard.one_shot = None;
                guard.recurring = Some(recurring);
            } else {
                // superseded while firing; the replacement owns the pair now
                recurring.abort();
            }
        });
        guard.one_shot = Some(handle);
    }

    /// Disable the reminder and tear down any live timers.
    ///
    /// Persists the bare disabled record; hour, minute, title and body
    /// revert to their defaults. Callers who want to keep them must pass
    /// them through [`schedule`](Self::schedule) again. Safe to call
    /// redundantly.
    pub fn cancel(&self) {
        if let Err(e) = self.store.write(&ReminderConfig::disabled()) {
            tracing::warn!("cannot persist reminder record: {e}");
        }

        let mut guard = self.timers.lock();
        guard.clear();
        guard.epoch += 1;
    }

    /// Re-arm timers for this session from the persisted record.
    ///
    /// Timers do not survive a process restart; call this once at session
    /// start. A disabled or unreadable record arms nothing.
    pub fn restore_from_storage(&self) {
        let cfg = self.store.read();
        if cfg.enabled {
            self.schedule(cfg.hour, cfg.minute, &cfg.title, &cfg.body);
        } else {
            tracing::debug!("daily reminder disabled, nothing to restore");
        }
    }

    /// Apply a full settings record from the controlling UI.
    ///
    /// Enabling requires consent: anything but `Granted` leaves the
    /// persisted record and the timers untouched, and the state is
    /// returned for the caller to surface. Disabling needs no consent.
    pub async fn set_config(&self, cfg: ReminderConfig) -> PermissionState {
        if !cfg.enabled {
            self.cancel();
            return self.backend.permission();
        }

        let state = self.backend.request_permission().await;
        if state != PermissionState::Granted {
            tracing::warn!("reminder not enabled, notification permission is {state}");
            return state;
        }

        self.schedule(cfg.hour, cfg.minute, &cfg.title, &cfg.body);
        state
    }

    /// The persisted record, defaults filled in.
    pub fn get_config(&self) -> ReminderConfig {
        self.store.read()
    }

    /// Whether the persisted record says the reminder is on.
    pub fn is_enabled(&self) -> bool {
        self.store.is_enabled()
    }

    /// True while a one-shot or recurring timer is live.
    pub fn is_armed(&self) -> bool {
        let guard = self.timers.lock();
        guard.one_shot.as_ref().is_some_and(|h| !h.is_finished())
            || guard.recurring.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Resolve the notification consent state, prompting if undecided.
    pub async fn request_permission(&self) -> PermissionState {
        self.backend.request_permission().await
    }

    /// Immediate preview notification; touches neither the persisted
    /// record nor the timers.
    pub fn test_fire(&self, title: Option<&str>, body: Option<&str>) {
        self.emitter.test_fire(title, body);
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.timers.lock().clear();
    }
}

/// Delay from `now` to the next occurrence of `hour:minute` local time.
///
/// The target is today if that instant is still strictly in the future,
/// otherwise tomorrow; the result is always positive and never more than
/// a day plus a DST correction. A wall-clock combination that does not
/// exist locally (DST gap) rolls to the next day.
pub(crate) fn delay_until_next(now: DateTime<Local>, hour: u8, minute: u8) -> Duration {
    let target = NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0)
        .unwrap_or_default();

    let mut date = now.date_naive();
    for _ in 0..3 {
        let candidate = match date.and_time(target).and_local_timezone(Local) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
            LocalResult::None => None,
        };
        if let Some(candidate) = candidate {
            if candidate > now {
                if let Ok(delay) = (candidate - now).to_std() {
                    return delay;
                }
            }
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    // clock skew or calendar edge: fall back to a full day
    DAY
}
