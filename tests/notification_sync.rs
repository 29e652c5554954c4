// Tests for the cancel-all-then-reschedule-all notification policy,
// using a recording scheduler in place of the platform service.
use chrono::{Local, TimeZone};
use shiftbell::model::{Alarm, AlarmSet};
use shiftbell::notify::{
    NOTIFICATION_TITLE, NotificationRequest, NotificationScheduler, NotificationSync, NotifyError,
    PermissionStatus, VIBRATION_PATTERN, notification_body,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
enum SchedulerEvent {
    CancelAll,
    Schedule(NotificationRequest),
}

#[derive(Default)]
struct RecordingScheduler {
    events: Mutex<Vec<SchedulerEvent>>,
}

impl RecordingScheduler {
    fn events(&self) -> Vec<SchedulerEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Requests still pending after replaying cancels in order.
    fn pending(&self) -> Vec<NotificationRequest> {
        let mut pending = Vec::new();
        for event in self.events() {
            match event {
                SchedulerEvent::CancelAll => pending.clear(),
                SchedulerEvent::Schedule(req) => pending.push(req),
            }
        }
        pending
    }
}

impl NotificationScheduler for RecordingScheduler {
    fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn cancel_all_scheduled(&self) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(SchedulerEvent::CancelAll);
        Ok(())
    }

    fn schedule_at(&self, request: NotificationRequest) -> Result<(), NotifyError> {
        self.events
            .lock()
            .unwrap()
            .push(SchedulerEvent::Schedule(request));
        Ok(())
    }
}

fn night_set() -> AlarmSet {
    AlarmSet {
        id: 1,
        name: "Night".to_string(),
        alarms: vec![
            Alarm {
                id: 9,
                time: "22:00".to_string(),
            },
            Alarm {
                id: 10,
                time: "23:30".to_string(),
            },
        ],
    }
}

#[test]
fn test_sync_cancels_before_scheduling() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let sync = NotificationSync::new(scheduler.clone());
    let set = night_set();

    let count = sync.sync(&set.alarms, &set.name, "2024-03-10").unwrap();
    assert_eq!(count, 2);

    let events = scheduler.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], SchedulerEvent::CancelAll);
    assert!(matches!(events[1], SchedulerEvent::Schedule(_)));
    assert!(matches!(events[2], SchedulerEvent::Schedule(_)));
}

#[test]
fn test_trigger_timestamps_combine_date_and_time() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let sync = NotificationSync::new(scheduler.clone());
    let set = night_set();

    sync.sync(&set.alarms, &set.name, "2024-03-10").unwrap();

    let pending = scheduler.pending();
    assert_eq!(
        pending[0].trigger,
        Local.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap()
    );
    assert_eq!(
        pending[1].trigger,
        Local.with_ymd_and_hms(2024, 3, 10, 23, 30, 0).unwrap()
    );
}

#[test]
fn test_notification_content() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let sync = NotificationSync::new(scheduler.clone());
    let set = night_set();

    sync.sync(&set.alarms, &set.name, "2024-03-10").unwrap();

    let request = &scheduler.pending()[0];
    assert_eq!(request.title, NOTIFICATION_TITLE);
    assert_eq!(request.body, notification_body("Night"));
    assert!(request.body.contains("Night"));
    assert!(request.sound);
    assert_eq!(request.vibration, VIBRATION_PATTERN.to_vec());
}

#[test]
fn test_sound_flag_follows_configuration() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let sync = NotificationSync::new(scheduler.clone()).with_sound(false);
    let set = night_set();

    sync.sync(&set.alarms, &set.name, "2024-03-10").unwrap();
    assert!(!scheduler.pending()[0].sound);
}

#[test]
fn test_second_assignment_wipes_first_dates_alarms() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let sync = NotificationSync::new(scheduler.clone());

    let night = night_set();
    let mut day = AlarmSet::new("Day");
    day.insert_alarm(Alarm::new(8, 0).unwrap());

    sync.sync(&night.alarms, &night.name, "2024-03-10").unwrap();
    sync.sync(&day.alarms, &day.name, "2024-03-11").unwrap();

    // Only the second date's alarms remain scheduled.
    let pending = scheduler.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(
        pending[0].trigger,
        Local.with_ymd_and_hms(2024, 3, 11, 8, 0, 0).unwrap()
    );
    assert_eq!(pending[0].body, notification_body("Day"));
}

#[test]
fn test_empty_alarm_list_only_cancels() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let sync = NotificationSync::new(scheduler.clone());

    let count = sync.sync(&[], "Rest", "2024-03-10").unwrap();
    assert_eq!(count, 0);
    assert_eq!(scheduler.events(), vec![SchedulerEvent::CancelAll]);
}

#[test]
fn test_past_trigger_is_still_scheduled() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let sync = NotificationSync::new(scheduler.clone());
    let set = night_set();

    // Far in the past; the platform decides whether it fires or drops.
    let count = sync.sync(&set.alarms, &set.name, "2001-01-01").unwrap();
    assert_eq!(count, 2);
    assert_eq!(scheduler.pending().len(), 2);
}

#[test]
fn test_invalid_date_key_is_rejected_before_cancelling() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let sync = NotificationSync::new(scheduler.clone());
    let set = night_set();

    let err = sync.sync(&set.alarms, &set.name, "10/03/2024").unwrap_err();
    assert!(matches!(err, NotifyError::InvalidDateKey(_)));
    assert!(scheduler.events().is_empty());
}

#[test]
fn test_malformed_alarm_time_is_skipped() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let sync = NotificationSync::new(scheduler.clone());

    let alarms = vec![
        Alarm {
            id: 1,
            time: "nonsense".to_string(),
        },
        Alarm {
            id: 2,
            time: "07:15".to_string(),
        },
    ];

    let count = sync.sync(&alarms, "Mixed", "2024-03-10").unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        scheduler.pending()[0].trigger,
        Local.with_ymd_and_hms(2024, 3, 10, 7, 15, 0).unwrap()
    );
}
