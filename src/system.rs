// File: ./src/system.rs
// Desktop implementation of the notification scheduler contract: a
// background actor that holds the pending queue, sleeps until the next
// trigger, and shows a desktop notification when it fires.
use crate::notify::{NotificationRequest, NotificationScheduler, NotifyError, PermissionStatus};
use chrono::Local;
use notify_rust::Notification;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, sleep_until};

#[derive(Debug)]
pub enum SchedulerCommand {
    /// Drop every pending notification.
    CancelAll,
    /// Queue one notification.
    Schedule(NotificationRequest),
}

fn show_notification(request: &NotificationRequest) {
    let mut notification = Notification::new();
    notification
        .summary(&request.title)
        .body(&request.body)
        .appname("Shiftbell");
    if request.sound {
        notification.sound_name("alarm-clock-elapsed");
    }
    // Vibration has no desktop equivalent; the pattern is carried for the
    // contract but not rendered here.
    if let Err(e) = notification.show() {
        log::warn!("failed to show notification: {}", e);
    }
}

/// Spawns the background scheduler actor.
/// returns: Sender to submit scheduler commands.
pub fn spawn_scheduler_actor() -> mpsc::Sender<SchedulerCommand> {
    let (tx, mut rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut pending: Vec<NotificationRequest> = Vec::new();

        loop {
            let now = Local::now();

            // Fire everything due. Past triggers fire immediately on
            // arrival, matching the "queues regardless" contract.
            let mut still_pending = Vec::with_capacity(pending.len());
            for request in pending.drain(..) {
                if request.trigger <= now {
                    log::info!("firing notification scheduled for {}", request.trigger);
                    // notify-rust show() can block on the DBus roundtrip.
                    std::thread::spawn(move || show_notification(&request));
                } else {
                    still_pending.push(request);
                }
            }
            pending = still_pending;

            // Wait Logic
            let next_wake = pending.iter().map(|r| r.trigger).min();
            if let Some(target) = next_wake {
                let millis_until = (target - Local::now()).num_milliseconds().max(0);
                let deadline = Instant::now() + Duration::from_millis(millis_until as u64);

                tokio::select! {
                    _ = sleep_until(deadline) => {
                        // Woke up for a trigger; loop recycles and fires it.
                    }
                    cmd = rx.recv() => {
                        match cmd {
                            Some(SchedulerCommand::CancelAll) => pending.clear(),
                            Some(SchedulerCommand::Schedule(request)) => pending.push(request),
                            None => break, // Channel closed, exit actor.
                        }
                    }
                }
            } else {
                // Nothing pending? Just wait for commands.
                match rx.recv().await {
                    Some(SchedulerCommand::CancelAll) => pending.clear(),
                    Some(SchedulerCommand::Schedule(request)) => pending.push(request),
                    None => break,
                }
            }
        }
    });

    tx
}

/// Handle to the scheduler actor, implementing the platform contract.
#[derive(Clone)]
pub struct SystemScheduler {
    tx: mpsc::Sender<SchedulerCommand>,
}

impl SystemScheduler {
    /// Spawns the actor and returns a handle to it. Must be called from
    /// within a tokio runtime.
    pub fn spawn() -> Self {
        Self {
            tx: spawn_scheduler_actor(),
        }
    }
}

impl NotificationScheduler for SystemScheduler {
    fn request_permission(&self) -> PermissionStatus {
        // Desktop notifications need no runtime grant; the permission step
        // exists for platforms that gate notifications behind one.
        PermissionStatus::Granted
    }

    fn cancel_all_scheduled(&self) -> Result<(), NotifyError> {
        self.tx
            .try_send(SchedulerCommand::CancelAll)
            .map_err(|e| NotifyError::ScheduleFailed(e.to_string()))
    }

    fn schedule_at(&self, request: NotificationRequest) -> Result<(), NotifyError> {
        self.tx
            .try_send(SchedulerCommand::Schedule(request))
            .map_err(|e| NotifyError::ScheduleFailed(e.to_string()))
    }
}
