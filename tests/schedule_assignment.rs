// Tests for the per-date schedule: assignment, unassignment, overwrite,
// and the snapshot-at-assignment-time copy semantics.
use shiftbell::context::{SharedContext, TestContext};
use shiftbell::model::{Alarm, AlarmSet};
use shiftbell::store::{AlarmSetStore, ScheduleStore};
use std::sync::Arc;

fn make_ctx() -> SharedContext {
    Arc::new(TestContext::new())
}

fn night_set() -> AlarmSet {
    AlarmSet {
        id: 1,
        name: "Night".to_string(),
        alarms: vec![Alarm {
            id: 9,
            time: "22:00".to_string(),
        }],
    }
}

#[test]
fn test_assign_then_get_returns_the_set() {
    let ctx = make_ctx();
    let mut schedule = ScheduleStore::load(ctx);
    let set = night_set();

    schedule.assign("2024-03-10", &set);

    let assigned = schedule.get("2024-03-10").unwrap();
    assert_eq!(assigned, &set);
    assert!(schedule.get("2024-03-11").is_none());
}

#[test]
fn test_unassign_removes_the_entry() {
    let ctx = make_ctx();
    let mut schedule = ScheduleStore::load(ctx);
    schedule.assign("2024-03-10", &night_set());

    assert!(schedule.unassign("2024-03-10"));
    assert!(schedule.get("2024-03-10").is_none());

    // Unassigning again is a no-op.
    assert!(!schedule.unassign("2024-03-10"));
}

#[test]
fn test_assign_overwrites_prior_entry() {
    let ctx = make_ctx();
    let mut schedule = ScheduleStore::load(ctx);

    schedule.assign("2024-03-10", &night_set());

    let mut day = AlarmSet::new("Day");
    day.insert_alarm(Alarm::new(8, 0).unwrap());
    schedule.assign("2024-03-10", &day);

    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule.get("2024-03-10").unwrap().name, "Day");
}

#[test]
fn test_assignment_is_a_snapshot_not_a_live_link() {
    let ctx = make_ctx();
    let mut sets = AlarmSetStore::load(ctx.clone());
    let mut schedule = ScheduleStore::load(ctx);

    let set_id = sets.create_set("Night").unwrap();
    let alarm_id = sets.add_alarm(set_id, 22, 0).unwrap();

    schedule.assign("2024-03-10", sets.get(set_id).unwrap());

    // Mutating the source set afterwards must not touch the assignment.
    sets.add_alarm(set_id, 23, 30).unwrap();
    sets.delete_alarm(set_id, alarm_id);

    let assigned = schedule.get("2024-03-10").unwrap();
    assert_eq!(assigned.alarms.len(), 1);
    assert_eq!(assigned.alarms[0].time, "22:00");
}

#[test]
fn test_schedule_survives_reload() {
    let ctx = make_ctx();

    {
        let mut schedule = ScheduleStore::load(ctx.clone());
        schedule.assign("2024-03-10", &night_set());
        let mut other = AlarmSet::new("Day");
        other.insert_alarm(Alarm::new(8, 30).unwrap());
        schedule.assign("2024-04-01", &other);
    }

    let reloaded = ScheduleStore::load(ctx);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.get("2024-03-10").unwrap().name, "Night");
    assert_eq!(reloaded.get("2024-04-01").unwrap().alarms[0].time, "08:30");
}
