// File: ./src/tui/handlers.rs
// Handles keyboard input for the TUI.
use crate::tui::state::{AppState, InputMode, PickerColumn, Tab};
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_key_event(state: &mut AppState, key: KeyEvent) {
    match state.mode {
        InputMode::NamingSet => handle_naming_key(state, key),
        InputMode::PickingTime => handle_picker_key(state, key),
        InputMode::Normal => match state.tab {
            Tab::Alarms => handle_alarms_key(state, key),
            Tab::Calendar => handle_calendar_key(state, key),
        },
    }
}

fn handle_naming_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.input_buffer.clear();
            state.mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            match state.alarm_sets.create_set(&state.input_buffer) {
                Some(_) => {
                    // Jump to the new set so the next 'a' targets it.
                    state.set_index = state.alarm_sets.sets().len() - 1;
                    state.alarm_state.select(None);
                    state.message = format!("Created set '{}'", state.input_buffer.trim());
                }
                None => state.message = "Set name cannot be empty".to_string(),
            }
            state.input_buffer.clear();
            state.mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.input_buffer.pop();
        }
        KeyCode::Char(c) => state.input_buffer.push(c),
        _ => {}
    }
}

fn handle_picker_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.mode = InputMode::Normal,
        KeyCode::Left | KeyCode::Char('h') => state.picker_column = PickerColumn::Hour,
        KeyCode::Right | KeyCode::Char('l') => state.picker_column = PickerColumn::Minute,
        KeyCode::Up | KeyCode::Char('k') => match state.picker_column {
            PickerColumn::Hour => state.picker_hour = (state.picker_hour + 1) % 24,
            PickerColumn::Minute => state.picker_minute = (state.picker_minute + 1) % 60,
        },
        KeyCode::Down | KeyCode::Char('j') => match state.picker_column {
            PickerColumn::Hour => state.picker_hour = (state.picker_hour + 23) % 24,
            PickerColumn::Minute => state.picker_minute = (state.picker_minute + 59) % 60,
        },
        KeyCode::Enter => {
            let Some(set_id) = state.selected_set().map(|s| s.id) else {
                state.message = "Select a set first".to_string();
                state.mode = InputMode::Normal;
                return;
            };
            match state
                .alarm_sets
                .add_alarm(set_id, state.picker_hour, state.picker_minute)
            {
                Some(_) => {
                    state.message = format!(
                        "Added {:02}:{:02}",
                        state.picker_hour, state.picker_minute
                    )
                }
                None => state.message = "Could not add alarm".to_string(),
            }
            state.mode = InputMode::Normal;
        }
        _ => {}
    }
}

fn handle_alarms_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Tab => state.tab = Tab::Calendar,
        KeyCode::Char('n') => {
            state.input_buffer.clear();
            state.mode = InputMode::NamingSet;
        }
        KeyCode::Left | KeyCode::Char('h') => state.select_previous_set(),
        KeyCode::Right | KeyCode::Char('l') => state.select_next_set(),
        KeyCode::Up | KeyCode::Char('k') => state.select_previous_alarm(),
        KeyCode::Down | KeyCode::Char('j') => state.select_next_alarm(),
        KeyCode::Char('a') => {
            if state.selected_set().is_none() {
                state.message = "Create a set first (n)".to_string();
            } else {
                let (h, m) = state.config.default_hour_minute();
                state.picker_hour = h;
                state.picker_minute = m;
                state.picker_column = PickerColumn::Hour;
                state.mode = InputMode::PickingTime;
            }
        }
        KeyCode::Char('d') => delete_selected_alarm(state),
        _ => {}
    }
}

fn delete_selected_alarm(state: &mut AppState) {
    let Some(set) = state.selected_set() else {
        return;
    };
    let set_id = set.id;
    let Some(idx) = state.alarm_state.selected() else {
        state.message = "Select an alarm to delete (j/k)".to_string();
        return;
    };
    let Some(alarm) = set.alarms.get(idx) else {
        return;
    };
    let alarm_id = alarm.id;
    let time = alarm.time.clone();

    if state.alarm_sets.delete_alarm(set_id, alarm_id) {
        state.message = format!("Deleted {}", time);
        // Keep the selection on a valid row.
        let remaining = state.selected_set().map_or(0, |s| s.alarms.len());
        if remaining == 0 {
            state.alarm_state.select(None);
        } else if idx >= remaining {
            state.alarm_state.select(Some(remaining - 1));
        }
    }
}

fn handle_calendar_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Tab => state.tab = Tab::Alarms,
        KeyCode::Char('[') => state.previous_month(),
        KeyCode::Char(']') => state.next_month(),
        KeyCode::Left => state.move_cursor(-1),
        KeyCode::Right => state.move_cursor(1),
        KeyCode::Up => state.move_cursor(-7),
        KeyCode::Down => state.move_cursor(7),
        KeyCode::Char('h') => state.select_previous_assign_candidate(),
        KeyCode::Char('l') => state.select_next_assign_candidate(),
        KeyCode::Enter => assign_under_cursor(state),
        KeyCode::Char('u') => unassign_under_cursor(state),
        _ => {}
    }
}

/// Assigns the highlighted set to the date under the cursor, then replaces
/// the scheduled notification queue with that date's alarms.
fn assign_under_cursor(state: &mut AppState) {
    let Some(date_key) = state.cursor_date_key() else {
        return;
    };
    let Some(set) = state.alarm_sets.sets().get(state.assign_index).cloned() else {
        state.message = "No alarm sets to assign; create one on the Alarms screen".to_string();
        return;
    };

    state.schedule.assign(&date_key, &set);

    match state.notifier.sync(&set.alarms, &set.name, &date_key) {
        Ok(count) => {
            state.message = format!("Assigned '{}' to {} ({} scheduled)", set.name, date_key, count)
        }
        Err(e) => {
            log::warn!("notification sync failed for {}: {}", date_key, e);
            state.message = format!("Assigned '{}', but notifications failed: {}", set.name, e);
        }
    }
}

fn unassign_under_cursor(state: &mut AppState) {
    let Some(date_key) = state.cursor_date_key() else {
        return;
    };
    if state.schedule.unassign(&date_key) {
        state.message = format!("Unassigned {}", date_key);
    }
}
