// File: ./src/model.rs
// Core data model: alarm sets and their alarms.
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Last id handed out, used to keep ids strictly increasing even when two
/// are requested within the same millisecond.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Returns a fresh unique id: the current unix timestamp in milliseconds,
/// bumped past the previously issued id when the clock hasn't advanced.
pub fn next_id() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(prev + 1);
        match LAST_ID.compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(actual) => prev = actual,
        }
    }
}

/// Formats an hour/minute pair as the canonical zero-padded "HH:MM" string.
/// Zero-padding makes lexicographic order equal chronological order.
pub fn format_time(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// A single time-of-day entry within an alarm set.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: i64,
    /// "HH:MM", 24-hour, zero-padded.
    pub time: String,
}

impl Alarm {
    /// Builds an alarm for the given time of day with a fresh id.
    /// Returns `None` when hour/minute are out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self {
            id: next_id(),
            time: format_time(hour, minute),
        })
    }

    /// Splits the stored "HH:MM" string back into numeric hour and minute.
    pub fn hour_minute(&self) -> Option<(u32, u32)> {
        let (h, m) = self.time.split_once(':')?;
        let hour: u32 = h.parse().ok()?;
        let minute: u32 = m.parse().ok()?;
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some((hour, minute))
    }
}

/// A named, ordered collection of times of day.
///
/// Invariant: `alarms` stays sorted ascending by `time` after every
/// insertion. The sort is stable, so equal times keep insertion order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlarmSet {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub alarms: Vec<Alarm>,
}

impl AlarmSet {
    pub fn new(name: &str) -> Self {
        Self {
            id: next_id(),
            name: name.to_string(),
            alarms: Vec::new(),
        }
    }

    /// Inserts an alarm and restores the sorted-by-time invariant.
    pub fn insert_alarm(&mut self, alarm: Alarm) {
        self.alarms.push(alarm);
        self.alarms.sort_by(|a, b| a.time.cmp(&b.time));
    }

    /// Removes the alarm with the given id. Returns whether one was removed.
    pub fn remove_alarm(&mut self, alarm_id: i64) -> bool {
        let before = self.alarms.len();
        self.alarms.retain(|a| a.id != alarm_id);
        self.alarms.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let ids: Vec<i64> = (0..100).map(|_| next_id()).collect();
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0], "ids must be strictly increasing");
        }
    }

    #[test]
    fn test_format_time_zero_pads() {
        assert_eq!(format_time(8, 0), "08:00");
        assert_eq!(format_time(22, 5), "22:05");
        assert_eq!(format_time(0, 0), "00:00");
    }

    #[test]
    fn test_alarm_rejects_out_of_range() {
        assert!(Alarm::new(24, 0).is_none());
        assert!(Alarm::new(0, 60).is_none());
        assert!(Alarm::new(23, 59).is_some());
    }

    #[test]
    fn test_insert_keeps_sorted_order() {
        let mut set = AlarmSet::new("Night");
        set.insert_alarm(Alarm::new(22, 0).unwrap());
        set.insert_alarm(Alarm::new(6, 30).unwrap());
        set.insert_alarm(Alarm::new(14, 15).unwrap());

        let times: Vec<&str> = set.alarms.iter().map(|a| a.time.as_str()).collect();
        assert_eq!(times, vec!["06:30", "14:15", "22:00"]);
    }

    #[test]
    fn test_equal_times_keep_insertion_order() {
        let mut set = AlarmSet::new("Doubles");
        let first = Alarm::new(9, 0).unwrap();
        let second = Alarm::new(9, 0).unwrap();
        let first_id = first.id;
        let second_id = second.id;
        set.insert_alarm(first);
        set.insert_alarm(second);

        assert_eq!(set.alarms[0].id, first_id);
        assert_eq!(set.alarms[1].id, second_id);
    }

    #[test]
    fn test_hour_minute_roundtrip() {
        let alarm = Alarm::new(7, 45).unwrap();
        assert_eq!(alarm.hour_minute(), Some((7, 45)));
    }
}
