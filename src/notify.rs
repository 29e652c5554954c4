// File: ./src/notify.rs
// Synchronizes the platform notification queue with one date's alarms.
//
// The strategy is "cancel all, then reschedule all": only one date's
// alarms are ever meant to be pending, so a sync wipes every scheduled
// notification and queues the assigned set's alarms from scratch. No
// per-notification bookkeeping is kept. Assigning a set to one date
// therefore drops notifications previously scheduled for any other date.
use crate::calendar;
use crate::model::Alarm;
use chrono::{DateTime, Local, LocalResult, TimeZone};
use std::fmt;
use std::sync::Arc;

/// Fixed title for every shift notification.
pub const NOTIFICATION_TITLE: &str = "Shift Alarm";

/// Fixed vibration pattern (delay/on/off/on, milliseconds).
pub const VIBRATION_PATTERN: [u32; 4] = [0, 250, 250, 250];

/// Notification body referencing the assigned set.
pub fn notification_body(set_name: &str) -> String {
    format!("It's time for your {} shift!", set_name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Errors surfaced by the notification service. Nothing here is retried;
/// callers log and move on.
#[derive(Debug)]
pub enum NotifyError {
    PermissionDenied,
    InvalidDateKey(String),
    ScheduleFailed(String),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::PermissionDenied => write!(f, "notification permission denied"),
            NotifyError::InvalidDateKey(key) => write!(f, "invalid date key: {}", key),
            NotifyError::ScheduleFailed(msg) => write!(f, "failed to schedule notification: {}", msg),
        }
    }
}

impl std::error::Error for NotifyError {}

/// One notification to be delivered at an absolute local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub trigger: DateTime<Local>,
    pub title: String,
    pub body: String,
    pub sound: bool,
    pub vibration: Vec<u32>,
}

/// The platform notification service, consumed as an opaque contract.
///
/// `schedule_at` queues regardless of whether the trigger is in the past;
/// past triggers fire immediately or are dropped by the implementation,
/// that behavior is not validated here.
pub trait NotificationScheduler: Send + Sync {
    fn request_permission(&self) -> PermissionStatus;
    fn cancel_all_scheduled(&self) -> Result<(), NotifyError>;
    fn schedule_at(&self, request: NotificationRequest) -> Result<(), NotifyError>;
}

/// Replaces the scheduled notification queue with the alarms of the set
/// assigned to one date.
pub struct NotificationSync {
    scheduler: Arc<dyn NotificationScheduler>,
    sound: bool,
}

impl NotificationSync {
    pub fn new(scheduler: Arc<dyn NotificationScheduler>) -> Self {
        Self {
            scheduler,
            sound: true,
        }
    }

    /// Overrides the sound flag attached to scheduled notifications
    /// (enabled by default).
    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    pub fn request_permission(&self) -> PermissionStatus {
        self.scheduler.request_permission()
    }

    /// Cancels every pending notification, then schedules one notification
    /// per alarm at the assignment date combined with the alarm's time of
    /// day (seconds zero, local time). Returns the number scheduled.
    ///
    /// Alarms with a malformed time string are skipped with a warning;
    /// they cannot be mapped to a trigger instant.
    pub fn sync(&self, alarms: &[Alarm], set_name: &str, date_key: &str) -> Result<usize, NotifyError> {
        let date = calendar::parse_date_key(date_key)
            .ok_or_else(|| NotifyError::InvalidDateKey(date_key.to_string()))?;

        log::debug!("notification sync for {}: cancelling all", date_key);
        self.scheduler.cancel_all_scheduled()?;

        log::debug!(
            "notification sync for {}: scheduling {} alarms",
            date_key,
            alarms.len()
        );
        let mut scheduled = 0;
        for alarm in alarms {
            let Some((hour, minute)) = alarm.hour_minute() else {
                log::warn!("skipping alarm {} with malformed time {:?}", alarm.id, alarm.time);
                continue;
            };
            // In-range hour/minute always form a valid wall-clock time.
            let naive = date.and_hms_opt(hour, minute, 0).unwrap();
            let trigger = match Local.from_local_datetime(&naive) {
                LocalResult::Single(dt) => dt,
                // DST fold: both instants carry the intended wall time; take the first.
                LocalResult::Ambiguous(dt, _) => dt,
                LocalResult::None => {
                    // DST gap: the wall time does not exist on this date.
                    log::warn!("skipping alarm {}: {} does not exist on {}", alarm.id, alarm.time, date_key);
                    continue;
                }
            };

            self.scheduler.schedule_at(NotificationRequest {
                trigger,
                title: NOTIFICATION_TITLE.to_string(),
                body: notification_body(set_name),
                sound: self.sound,
                vibration: VIBRATION_PATTERN.to_vec(),
            })?;
            scheduled += 1;
        }

        Ok(scheduled)
    }
}
