// File: ./src/store.rs
// In-memory stores for the alarm-set collection and the per-date schedule.
//
// Each store is the single owner of its state. Mutations apply in memory
// first and then write the whole blob back to disk; a failed write is
// logged and otherwise ignored, because the next mutation re-writes the
// full state anyway.
use crate::context::SharedContext;
use crate::model::{Alarm, AlarmSet};
use crate::storage::LocalStorage;
use std::collections::HashMap;

/// Owns the list of alarm sets and persists it on every change.
pub struct AlarmSetStore {
    ctx: SharedContext,
    sets: Vec<AlarmSet>,
}

impl AlarmSetStore {
    /// Loads the collection from disk. A read failure is logged and treated
    /// as an empty collection; memory is authoritative from then on.
    pub fn load(ctx: SharedContext) -> Self {
        let sets = match LocalStorage::load_alarm_sets(ctx.as_ref()) {
            Ok(sets) => sets,
            Err(e) => {
                log::warn!("failed to load alarm sets, starting empty: {}", e);
                Vec::new()
            }
        };
        Self { ctx, sets }
    }

    pub fn sets(&self) -> &[AlarmSet] {
        &self.sets
    }

    pub fn get(&self, set_id: i64) -> Option<&AlarmSet> {
        self.sets.iter().find(|s| s.id == set_id)
    }

    /// Creates a new, empty alarm set. A name that trims to empty is a
    /// no-op. Returns the new set's id.
    pub fn create_set(&mut self, name: &str) -> Option<i64> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let set = AlarmSet::new(name);
        let id = set.id;
        self.sets.push(set);
        self.persist();
        Some(id)
    }

    /// Adds an alarm to the given set, keeping the set's alarms sorted by
    /// time. A no-op when the set doesn't exist or the time is out of
    /// range. Returns the new alarm's id.
    pub fn add_alarm(&mut self, set_id: i64, hour: u32, minute: u32) -> Option<i64> {
        let alarm = Alarm::new(hour, minute)?;
        let id = alarm.id;
        let set = self.sets.iter_mut().find(|s| s.id == set_id)?;
        set.insert_alarm(alarm);
        self.persist();
        Some(id)
    }

    /// Removes the alarm with the given id from the set, if present.
    pub fn delete_alarm(&mut self, set_id: i64, alarm_id: i64) -> bool {
        let Some(set) = self.sets.iter_mut().find(|s| s.id == set_id) else {
            return false;
        };
        if !set.remove_alarm(alarm_id) {
            return false;
        }
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(e) = LocalStorage::save_alarm_sets(self.ctx.as_ref(), &self.sets) {
            log::warn!("failed to persist alarm sets: {}", e);
        }
    }
}

/// Owns the mapping from date key ("YYYY-MM-DD") to assigned alarm set and
/// persists it on every change.
///
/// Assignments store a snapshot of the set taken at assignment time, not a
/// live reference: editing or deleting a set afterwards leaves existing
/// assignments untouched.
pub struct ScheduleStore {
    ctx: SharedContext,
    schedules: HashMap<String, AlarmSet>,
}

impl ScheduleStore {
    pub fn load(ctx: SharedContext) -> Self {
        let schedules = match LocalStorage::load_schedules(ctx.as_ref()) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("failed to load schedule, starting empty: {}", e);
                HashMap::new()
            }
        };
        Self { ctx, schedules }
    }

    /// Assigns a copy of `set` to `date_key`, overwriting any prior entry,
    /// and persists the full mapping before returning. The caller is
    /// expected to follow up with a notification sync for this date.
    pub fn assign(&mut self, date_key: &str, set: &AlarmSet) {
        self.schedules.insert(date_key.to_string(), set.clone());
        self.persist();
    }

    /// Removes the assignment for `date_key` if present.
    pub fn unassign(&mut self, date_key: &str) -> bool {
        if self.schedules.remove(date_key).is_none() {
            return false;
        }
        self.persist();
        true
    }

    /// The set assigned to `date_key`, if any.
    pub fn get(&self, date_key: &str) -> Option<&AlarmSet> {
        self.schedules.get(date_key)
    }

    pub fn is_assigned(&self, date_key: &str) -> bool {
        self.schedules.contains_key(date_key)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    fn persist(&self) {
        if let Err(e) = LocalStorage::save_schedules(self.ctx.as_ref(), &self.schedules) {
            log::warn!("failed to persist schedule: {}", e);
        }
    }
}
