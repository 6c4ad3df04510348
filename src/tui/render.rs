use std::time::Instant;

use rand::RngCore;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{Hitboxes, InputMode, TuiApp, DELETE_COLUMN_WIDTH};
use crate::color;
use crate::task::Task;

/// Row background for the cursor.
const CURSOR_BG: Color = Color::Rgb(0x4A, 0x14, 0x8C);

const PLACEHOLDER: &str = "What's your next task?";

/// Line of the close button inside the detail modal.
const CLOSE_BUTTON_LINE: u16 = 8;

/// Draw the UI. Returns the regions mouse handling needs.
pub(super) fn draw_ui<R: RngCore>(f: &mut Frame, app: &TuiApp<R>, now: Instant) -> Hitboxes {
    let size = f.area();
    f.render_widget(Clear, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Task list
            Constraint::Length(3), // Input
        ])
        .split(size);

    draw_header(f, chunks[0], app, now);
    let (list, list_offset) = draw_list(f, chunks[1], app);
    draw_input(f, chunks[2], app);

    let mut hitboxes = Hitboxes {
        list,
        list_offset,
        input: chunks[2],
        close_button: None,
    };

    if let Some(task) = app.controller().selected_task() {
        hitboxes.close_button = Some(draw_detail_modal(f, size, task));
    }

    if app.show_quit_modal {
        draw_quit_modal(f, size, app.controller().len());
    }

    hitboxes
}

/// Draw the title, task count and pulse indicator.
fn draw_header<R: RngCore>(f: &mut Frame, area: Rect, app: &TuiApp<R>, now: Instant) {
    let count = app.controller().len();
    let subtitle = format!("{} {}", count, if count == 1 { "Task" } else { "Tasks" });
    let done = app.controller().completed_count();
    let pending = app.controller().pending_count();

    let mut lines = vec![
        Line::from(Span::styled(
            app.options.title.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(subtitle, Style::default().fg(Color::Gray)),
            Span::styled(
                if done > 0 {
                    format!("  ({} pending, {} done)", pending, done)
                } else {
                    String::new()
                },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    lines.truncate(area.height.saturating_sub(1) as usize);

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);

    if let Some(intensity) = app.active_pulse(now) {
        let pulse = Paragraph::new(Span::styled(
            "\u{25c9}",
            Style::default()
                .fg(color::pulse_color(intensity))
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right);
        f.render_widget(pulse, Rect::new(area.x, area.y, area.width, 1));
    }
}

/// Draw the task list. Returns the row area and the index of its first row.
fn draw_list<R: RngCore>(f: &mut Frame, area: Rect, app: &TuiApp<R>) -> (Rect, usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Tasks [\u{2191}\u{2193} move, space toggle, o details, d delete, a add, q quit] ")
        .title_style(Style::default().fg(Color::White));
    f.render_widget(block, area);

    let inner = area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    if inner.height == 0 || inner.width <= DELETE_COLUMN_WIDTH {
        return (inner, 0);
    }

    let tasks = app.controller().tasks();
    if tasks.is_empty() {
        draw_empty_state(f, inner);
        return (inner, 0);
    }

    // Keep the cursor row visible
    let height = inner.height as usize;
    let offset = (app.cursor + 1).saturating_sub(height);
    let end = (offset + height).min(tasks.len());

    let text_width = inner.width - DELETE_COLUMN_WIDTH;
    let text_area = Rect::new(inner.x, inner.y, text_width, inner.height);
    let delete_area = Rect::new(inner.x + text_width, inner.y, DELETE_COLUMN_WIDTH, inner.height);

    let mut rows = Vec::with_capacity(end - offset);
    let mut deletes = Vec::with_capacity(end - offset);
    for (idx, task) in tasks[offset..end].iter().enumerate() {
        let is_cursor = offset + idx == app.cursor && app.input_mode == InputMode::Normal;
        let bg = if is_cursor { CURSOR_BG } else { Color::Reset };
        rows.push(task_row(task, bg));
        deletes.push(Line::from(Span::styled(
            " \u{2715} ",
            Style::default().fg(Color::Red).bg(bg),
        )));
    }

    f.render_widget(Paragraph::new(rows), text_area);
    f.render_widget(Paragraph::new(deletes), delete_area);

    (inner, offset)
}

/// One list row: priority bar, status dot, text.
fn task_row(task: &Task, bg: Color) -> Line<'_> {
    let text_style = if task.is_completed() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(
            "\u{258c} ",
            Style::default().fg(color::priority_color(task.priority())),
        ),
        Span::styled("\u{25cf} ", Style::default().fg(color::status_color(task))),
        Span::styled(task.text(), text_style),
    ])
    .style(Style::default().bg(bg))
}

fn draw_empty_state(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "\u{2630}",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Your task list is empty",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Add a new task to get started",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Draw the new-task input.
fn draw_input<R: RngCore>(f: &mut Frame, area: Rect, app: &TuiApp<R>) {
    let editing = app.input_mode == InputMode::Editing;
    let draft = app.controller().draft();

    let (border_color, title) = if editing {
        (Color::Yellow, " New task (Enter to add, Esc to finish) ")
    } else {
        (Color::DarkGray, " New task (a to type) ")
    };

    let line = if draft.is_empty() && !editing {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else if editing {
        Line::from(vec![
            Span::styled(draft, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(Span::styled(draft, Style::default().fg(Color::White)))
    };

    let input = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title)
            .title_style(Style::default().fg(border_color)),
    );
    f.render_widget(input, area);
}

/// Centered rectangle clamped to `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Draw the detail modal. Returns the close button row.
fn draw_detail_modal(f: &mut Frame, area: Rect, task: &Task) -> Rect {
    let modal_area = centered(area, 50, CLOSE_BUTTON_LINE + 3);
    f.render_widget(Clear, modal_area);

    let inner = modal_area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    let priority_style = Style::default().fg(color::priority_color(task.priority()));
    let max_text = inner.width.saturating_sub(2) as usize;
    let text: String = if task.text().chars().count() > max_text {
        let mut t: String = task.text().chars().take(max_text.saturating_sub(1)).collect();
        t.push('\u{2026}');
        t
    } else {
        task.text().to_string()
    };
    let status_style = if task.is_completed() {
        Style::default().fg(color::status_color(task))
    } else {
        Style::default().fg(Color::White)
    };

    let modal_text = vec![
        Line::from(""),
        Line::from(Span::styled(text, priority_style.add_modifier(Modifier::BOLD))),
        Line::from(""),
        detail_row("Created:", task.created_display(), Style::default().fg(Color::White)),
        detail_row("Status:", task.status_label().to_string(), status_style),
        detail_row("Priority:", task.priority().label().to_string(), priority_style),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "[ Close ]",
            Style::default()
                .fg(Color::White)
                .bg(color::accent())
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let modal = Paragraph::new(modal_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color::accent()))
                .title(" Task Details ")
                .title_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
        );
    f.render_widget(modal, modal_area);

    Rect::new(
        inner.x,
        inner.y + CLOSE_BUTTON_LINE.min(inner.height.saturating_sub(1)),
        inner.width,
        1,
    )
}

fn detail_row(label: &'static str, value: String, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, style.add_modifier(Modifier::BOLD)),
    ])
}

/// Draw the quit confirmation modal.
fn draw_quit_modal(f: &mut Frame, area: Rect, task_count: usize) {
    let modal_area = centered(area, 44, 7);
    f.render_widget(Clear, modal_area);

    let modal_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Tasks are not saved!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Quit and discard {} {}?",
            task_count,
            if task_count == 1 { "task" } else { "tasks" }
        )),
        Line::from(Span::styled("[Y]es  [N]o", Style::default().fg(Color::Cyan))),
    ];

    let modal = Paragraph::new(modal_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Quit? ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        );

    f.render_widget(modal, modal_area);
}
