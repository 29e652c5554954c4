// File: ./src/tui/view.rs
use crate::calendar::GridCell;
use crate::tui::state::{AppState, InputMode, PickerColumn, Tab};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_tabs(f, state, v_chunks[0]);

    match state.tab {
        Tab::Alarms => draw_alarms_tab(f, state, v_chunks[1]),
        Tab::Calendar => draw_calendar_tab(f, state, v_chunks[1]),
    }

    draw_footer(f, state, v_chunks[2]);
}

fn draw_tabs(f: &mut Frame, state: &AppState, area: Rect) {
    let titles = vec![Line::from("Alarms"), Line::from("Calendar")];
    let selected = match state.tab {
        Tab::Alarms => 0,
        Tab::Calendar => 1,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(" Shiftbell "))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn draw_alarms_tab(f: &mut Frame, state: &mut AppState, area: Rect) {
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    // Set list (left).
    let set_items: Vec<ListItem> = state
        .alarm_sets
        .sets()
        .iter()
        .enumerate()
        .map(|(i, set)| {
            let style = if i == state.set_index {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} ({})", set.name, set.alarms.len())).style(style)
        })
        .collect();
    let sets_list = List::new(set_items)
        .block(Block::default().borders(Borders::ALL).title(" Sets (h/l) "));
    f.render_widget(sets_list, h_chunks[0]);

    // Alarm list of the selected set (right).
    let title = match state.selected_set() {
        Some(set) => format!(" Alarms for {} ", set.name),
        None => " Alarms ".to_string(),
    };
    let alarm_items: Vec<ListItem> = state
        .selected_set()
        .map(|set| {
            set.alarms
                .iter()
                .map(|a| ListItem::new(a.time.clone()))
                .collect()
        })
        .unwrap_or_default();
    let alarms_list = List::new(alarm_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    f.render_stateful_widget(alarms_list, h_chunks[1], &mut state.alarm_state);
}

fn draw_calendar_tab(f: &mut Frame, state: &AppState, area: Rect) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(6),
        ])
        .split(area);

    let header = Paragraph::new(format!(
        "< [  {} {}  ] >",
        MONTH_NAMES[state.month0 as usize], state.year
    ))
    .alignment(Alignment::Center)
    .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(header, v_chunks[0]);

    let weekdays = Paragraph::new("   Sun    Mon    Tue    Wed    Thu    Fri    Sat")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(weekdays, v_chunks[1]);

    f.render_widget(grid_paragraph(state), v_chunks[2]);
    draw_day_panel(f, state, v_chunks[3]);
}

/// Renders the month grid as rows of seven fixed-width cells.
fn grid_paragraph(state: &AppState) -> Paragraph<'static> {
    let mut lines = Vec::new();
    for (week_idx, week) in state.grid.chunks(7).enumerate() {
        let mut spans = Vec::new();
        for (col, cell) in week.iter().enumerate() {
            let index = week_idx * 7 + col;
            let text = match cell {
                GridCell::Blank => "       ".to_string(),
                GridCell::Day(d) => {
                    let key = crate::calendar::format_date(state.year, state.month0, *d);
                    match state.schedule.get(&key) {
                        Some(set) if state.config.show_assigned_names => {
                            format!("{:>3} {:<3}", d, truncate(&set.name, 3))
                        }
                        Some(_) => format!("{:>3} *  ", d),
                        None => format!("{:>3}    ", d),
                    }
                }
            };
            let mut style = Style::default();
            if let GridCell::Day(d) = cell {
                let key = crate::calendar::format_date(state.year, state.month0, *d);
                if state.schedule.is_assigned(&key) {
                    style = style.fg(Color::Green);
                }
            }
            if index == state.cursor {
                style = style.bg(Color::Blue).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    Paragraph::new(lines)
}

fn draw_day_panel(f: &mut Frame, state: &AppState, area: Rect) {
    let mut lines = Vec::new();

    if let Some(date_key) = state.cursor_date_key() {
        lines.push(Line::from(Span::styled(
            format!("Selected: {}", date_key),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));

        if let Some(set) = state.schedule.get(&date_key) {
            let times: Vec<&str> = set.alarms.iter().map(|a| a.time.as_str()).collect();
            lines.push(Line::from(format!("Assigned set: {}", set.name)));
            lines.push(Line::from(format!("Times: {}", times.join(", "))));
            lines.push(Line::from(Span::styled(
                "u: unassign",
                Style::default().fg(Color::Red),
            )));
        } else if state.alarm_sets.sets().is_empty() {
            lines.push(Line::from("No alarm sets yet; create one on the Alarms screen."));
        } else {
            lines.push(Line::from("Assign a set (h/l to choose, Enter to assign):"));
            let mut spans = Vec::new();
            for (i, set) in state.alarm_sets.sets().iter().enumerate() {
                let style = if i == state.assign_index {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                spans.push(Span::styled(format!(" {} ", set.name), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
    }

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Day "));
    f.render_widget(panel, area);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    let content = match state.mode {
        InputMode::NamingSet => Line::from(vec![
            Span::styled("New set name: ", Style::default().fg(Color::Yellow)),
            Span::raw(state.input_buffer.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        InputMode::PickingTime => {
            let hour_style = if state.picker_column == PickerColumn::Hour {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::Yellow)
            };
            let minute_style = if state.picker_column == PickerColumn::Minute {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::Yellow)
            };
            Line::from(vec![
                Span::raw("Alarm time (j/k adjust, h/l column, Enter add): "),
                Span::styled(format!("{:02}", state.picker_hour), hour_style),
                Span::raw(":"),
                Span::styled(format!("{:02}", state.picker_minute), minute_style),
            ])
        }
        InputMode::Normal => {
            if state.message.is_empty() {
                match state.tab {
                    Tab::Alarms => Line::from(
                        "n:New set  a:Add alarm  d:Delete alarm  h/l:Set  j/k:Alarm  Tab:Calendar  q:Quit",
                    ),
                    Tab::Calendar => Line::from(
                        "Arrows:Day  [/]:Month  h/l:Pick set  Enter:Assign  u:Unassign  Tab:Alarms  q:Quit",
                    ),
                }
            } else {
                Line::from(state.message.clone())
            }
        }
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
