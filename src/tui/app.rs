use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use rand::RngCore;
use ratatui::layout::Rect;

use crate::controller::{Intent, Outcome, TaskController};
use crate::feedback::Intensity;
use crate::session::Session;
use crate::task::TaskId;

/// How long the pulse indicator stays lit.
pub(super) const PULSE_DURATION: Duration = Duration::from_millis(250);

/// Width of the delete affordance column at the right edge of the list.
pub(super) const DELETE_COLUMN_WIDTH: u16 = 3;

/// Input mode for the TUI
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum InputMode {
    /// List navigation
    Normal,
    /// Typing into the new-task input
    Editing,
}

/// Screen regions from the last frame, used to route mouse clicks.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct Hitboxes {
    /// Task rows, one line per task.
    pub(super) list: Rect,
    /// Index of the task drawn on the first row of `list`.
    pub(super) list_offset: usize,
    pub(super) input: Rect,
    /// Close button row of the detail modal, when open.
    pub(super) close_button: Option<Rect>,
}

/// Presentation settings.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub title: String,
    /// Ring the terminal bell on feedback pulses.
    pub bell: bool,
    pub mouse: bool,
}

/// TUI application state
pub struct TuiApp<R> {
    session: Session<R>,
    /// Feedback pulses posted by the controller
    pulses: Receiver<Intensity>,
    /// Last pulse and when it arrived
    pulse: Option<(Intensity, Instant)>,
    pending_bell: bool,
    log_warning: Option<String>,
    pub(super) options: TuiOptions,
    /// Highlighted row
    pub(super) cursor: usize,
    pub(super) input_mode: InputMode,
    /// Whether the quit confirmation modal is showing
    pub(super) show_quit_modal: bool,
    /// Whether the user confirmed quit
    pub(super) should_quit: bool,
    pub(super) hitboxes: Hitboxes,
}

impl<R: RngCore> TuiApp<R> {
    pub fn new(session: Session<R>, pulses: Receiver<Intensity>, options: TuiOptions) -> Self {
        Self {
            session,
            pulses,
            pulse: None,
            pending_bell: false,
            log_warning: None,
            options,
            cursor: 0,
            input_mode: InputMode::Normal,
            show_quit_modal: false,
            should_quit: false,
            hitboxes: Hitboxes::default(),
        }
    }

    pub fn controller(&self) -> &TaskController<R> {
        self.session.controller()
    }

    /// First session log failure, reported after the terminal is restored.
    pub fn take_log_warning(&mut self) -> Option<String> {
        self.log_warning.take()
    }

    /// Drain pending feedback pulses.
    pub(super) fn process_pulses(&mut self, now: Instant) {
        while let Ok(intensity) = self.pulses.try_recv() {
            self.pulse = Some((intensity, now));
            if self.options.bell {
                self.pending_bell = true;
            }
        }
    }

    /// The pulse to show at `now`, if still lit.
    pub(super) fn active_pulse(&self, now: Instant) -> Option<Intensity> {
        match self.pulse {
            Some((intensity, at)) if now.duration_since(at) < PULSE_DURATION => Some(intensity),
            _ => None,
        }
    }

    /// Whether a bell should be rung; clears the request.
    pub(super) fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.pending_bell)
    }

    fn dispatch(&mut self, intent: Intent) -> Outcome {
        let outcome = self.session.dispatch(intent);
        if let Some(e) = self.session.take_log_error() {
            if self.log_warning.is_none() {
                self.log_warning = Some(e);
            }
        }
        self.clamp_cursor();
        outcome
    }

    fn clamp_cursor(&mut self) {
        let len = self.controller().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn current_id(&self) -> Option<TaskId> {
        self.controller().tasks().get(self.cursor).map(|t| t.id())
    }

    fn request_quit(&mut self) {
        if self.controller().is_empty() {
            self.should_quit = true;
        } else {
            self.show_quit_modal = true;
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.controller().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, len as isize - 1) as usize;
    }

    /// Handle a key event.
    pub(super) fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Handle quit modal first
        if self.show_quit_modal {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.should_quit = true;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.show_quit_modal = false;
                }
                _ => {}
            }
            return;
        }

        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            self.request_quit();
            return;
        }

        if let Some(id) = self.controller().selected_task_id() {
            match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.dispatch(Intent::CloseDetails);
                }
                KeyCode::Char(' ') => {
                    self.dispatch(Intent::Toggle(id));
                }
                KeyCode::Char('d') | KeyCode::Delete => {
                    self.dispatch(Intent::Delete(id));
                }
                _ => {}
            }
            return;
        }

        match self.input_mode {
            InputMode::Editing => match key {
                KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Enter => {
                    if let Outcome::Added(_) = self.dispatch(Intent::Add) {
                        self.cursor = self.controller().len().saturating_sub(1);
                    }
                }
                KeyCode::Backspace => {
                    let mut draft = self.controller().draft().to_string();
                    draft.pop();
                    self.dispatch(Intent::SetDraft(draft));
                }
                KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.dispatch(Intent::SetDraft(String::new()));
                }
                KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                    let mut draft = self.controller().draft().to_string();
                    draft.push(c);
                    self.dispatch(Intent::SetDraft(draft));
                }
                _ => {}
            },
            InputMode::Normal => match key {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.request_quit(),
                KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => {
                    self.input_mode = InputMode::Editing;
                }
                KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
                KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
                KeyCode::PageUp => self.move_cursor(-10),
                KeyCode::PageDown => self.move_cursor(10),
                KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
                KeyCode::End | KeyCode::Char('G') => {
                    self.cursor = self.controller().len().saturating_sub(1);
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(id) = self.current_id() {
                        self.dispatch(Intent::Toggle(id));
                    }
                }
                KeyCode::Char('o') | KeyCode::Char('l') | KeyCode::Right => {
                    if let Some(id) = self.current_id() {
                        self.dispatch(Intent::Select(id));
                    }
                }
                KeyCode::Char('d') | KeyCode::Delete => {
                    if let Some(id) = self.current_id() {
                        self.dispatch(Intent::Delete(id));
                    }
                }
                _ => {}
            },
        }
    }

    /// Handle a mouse event at a terminal cell.
    ///
    /// Left click on a row toggles it, right click opens its details, and a
    /// left click on the delete column removes it.
    pub(super) fn handle_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        if self.show_quit_modal {
            return;
        }

        if self.controller().detail().is_open() {
            if let MouseEventKind::Down(MouseButton::Left) = kind {
                if let Some(close) = self.hitboxes.close_button {
                    if contains(close, column, row) {
                        self.dispatch(Intent::CloseDetails);
                    }
                }
            }
            return;
        }

        match kind {
            MouseEventKind::ScrollUp => self.move_cursor(-1),
            MouseEventKind::ScrollDown => self.move_cursor(1),
            MouseEventKind::Down(button) => {
                if contains(self.hitboxes.input, column, row) {
                    if button == MouseButton::Left {
                        self.input_mode = InputMode::Editing;
                    }
                    return;
                }
                let Some(index) = self.row_at(column, row) else {
                    return;
                };
                self.input_mode = InputMode::Normal;
                self.cursor = index;
                let Some(id) = self.current_id() else {
                    return;
                };
                let list = self.hitboxes.list;
                let delete_from = list.x + list.width.saturating_sub(DELETE_COLUMN_WIDTH);
                match button {
                    MouseButton::Left if column >= delete_from => {
                        self.dispatch(Intent::Delete(id));
                    }
                    MouseButton::Left => {
                        self.dispatch(Intent::Toggle(id));
                    }
                    MouseButton::Right => {
                        self.dispatch(Intent::Select(id));
                    }
                    MouseButton::Middle => {}
                }
            }
            _ => {}
        }
    }

    /// Task index under a cell, if any.
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let list = self.hitboxes.list;
        if !contains(list, column, row) {
            return None;
        }
        let index = self.hitboxes.list_offset + (row - list.y) as usize;
        (index < self.controller().len()).then_some(index)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
