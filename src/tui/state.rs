// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::calendar::{self, GridCell};
use crate::config::Config;
use crate::context::SharedContext;
use crate::model::AlarmSet;
use crate::notify::{NotificationScheduler, NotificationSync};
use crate::store::{AlarmSetStore, ScheduleStore};
use ratatui::widgets::ListState;
use std::sync::Arc;

#[derive(PartialEq, Clone, Copy)]
pub enum Tab {
    Alarms,
    Calendar,
}

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    /// Typing the name of a new alarm set.
    NamingSet,
    /// Adjusting the hour/minute picker for a new alarm.
    PickingTime,
}

/// Which picker column the up/down keys adjust.
#[derive(PartialEq, Clone, Copy)]
pub enum PickerColumn {
    Hour,
    Minute,
}

pub struct AppState {
    // Data
    pub ctx: SharedContext,
    pub alarm_sets: AlarmSetStore,
    pub schedule: ScheduleStore,
    pub notifier: NotificationSync,
    pub config: Config,

    // UI State
    pub tab: Tab,
    pub mode: InputMode,
    pub message: String,
    pub should_quit: bool,

    // Alarms tab
    pub set_index: usize,
    pub alarm_state: ListState,
    pub input_buffer: String,
    pub picker_hour: u32,
    pub picker_minute: u32,
    pub picker_column: PickerColumn,

    // Calendar tab
    pub year: i32,
    pub month0: u32,
    pub grid: Vec<GridCell>,
    pub cursor: usize,
    pub assign_index: usize,
}

impl AppState {
    pub fn new(ctx: SharedContext, config: Config, scheduler: Arc<dyn NotificationScheduler>) -> Self {
        let alarm_sets = AlarmSetStore::load(ctx.clone());
        let schedule = ScheduleStore::load(ctx.clone());
        let notifier = NotificationSync::new(scheduler).with_sound(config.notification_sound);
        let (year, month0) = calendar::current_year_month0();
        let grid = calendar::build_grid(year, month0);
        // Start the cursor on day 1 rather than a leading blank.
        let cursor = grid.iter().position(|c| c.day().is_some()).unwrap_or(0);
        let (picker_hour, picker_minute) = config.default_hour_minute();

        Self {
            ctx,
            alarm_sets,
            schedule,
            notifier,
            config,
            tab: Tab::Alarms,
            mode: InputMode::Normal,
            message: String::new(),
            should_quit: false,
            set_index: 0,
            alarm_state: ListState::default(),
            input_buffer: String::new(),
            picker_hour,
            picker_minute,
            picker_column: PickerColumn::Hour,
            year,
            month0,
            grid,
            cursor,
            assign_index: 0,
        }
    }

    pub fn selected_set(&self) -> Option<&AlarmSet> {
        self.alarm_sets.sets().get(self.set_index)
    }

    /// Date key under the calendar cursor, when it sits on a day cell.
    pub fn cursor_date_key(&self) -> Option<String> {
        let day = self.grid.get(self.cursor)?.day()?;
        Some(calendar::format_date(self.year, self.month0, day))
    }

    /// Rebuilds the grid after a month change and clamps the cursor back
    /// onto a day cell.
    pub fn rebuild_grid(&mut self) {
        self.grid = calendar::build_grid(self.year, self.month0);
        self.cursor = self
            .grid
            .iter()
            .position(|c| c.day().is_some())
            .unwrap_or(0);
    }

    pub fn previous_month(&mut self) {
        if self.month0 == 0 {
            self.month0 = 11;
            self.year -= 1;
        } else {
            self.month0 -= 1;
        }
        self.rebuild_grid();
    }

    pub fn next_month(&mut self) {
        if self.month0 == 11 {
            self.month0 = 0;
            self.year += 1;
        } else {
            self.month0 += 1;
        }
        self.rebuild_grid();
    }

    /// Moves the calendar cursor by `delta` cells, skipping off-grid
    /// positions and leading blanks.
    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.grid.len() as i32;
        if len == 0 {
            return;
        }
        let mut target = self.cursor as i32 + delta;
        target = target.clamp(0, len - 1);
        // Never rest on a blank cell; they only precede day 1.
        while target < len && self.grid[target as usize].day().is_none() {
            target += 1;
        }
        if target < len {
            self.cursor = target as usize;
        }
    }

    pub fn select_previous_set(&mut self) {
        if self.set_index > 0 {
            self.set_index -= 1;
            self.alarm_state.select(None);
        }
    }

    pub fn select_next_set(&mut self) {
        if self.set_index + 1 < self.alarm_sets.sets().len() {
            self.set_index += 1;
            self.alarm_state.select(None);
        }
    }

    pub fn select_previous_assign_candidate(&mut self) {
        if self.assign_index > 0 {
            self.assign_index -= 1;
        }
    }

    pub fn select_next_assign_candidate(&mut self) {
        if self.assign_index + 1 < self.alarm_sets.sets().len() {
            self.assign_index += 1;
        }
    }

    pub fn select_previous_alarm(&mut self) {
        let len = self.selected_set().map_or(0, |s| s.alarms.len());
        if len == 0 {
            return;
        }
        let current = self.alarm_state.selected().unwrap_or(0);
        self.alarm_state.select(Some(current.saturating_sub(1)));
    }

    pub fn select_next_alarm(&mut self) {
        let len = self.selected_set().map_or(0, |s| s.alarms.len());
        if len == 0 {
            return;
        }
        let current = self.alarm_state.selected().unwrap_or(0);
        self.alarm_state.select(Some((current + 1).min(len - 1)));
    }
}
