//! Priority and status colors.
//!
//! The same palette is exposed as ratatui colors for the TUI and as ANSI
//! escape sequences for line mode.

use ratatui::style::Color;

use crate::feedback::Intensity;
use crate::task::{Priority, Task};

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const STRIKE: &str = "\x1b[9m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

use codes::*;

/// Palette as RGB triples.
pub mod rgb {
    pub const HIGH: (u8, u8, u8) = (0xFF, 0x57, 0x22);
    pub const MEDIUM: (u8, u8, u8) = (0xFF, 0x98, 0x00);
    pub const LOW: (u8, u8, u8) = (0x21, 0x96, 0xF3);
    pub const COMPLETED: (u8, u8, u8) = (0x4C, 0xAF, 0x50);
    pub const ACCENT: (u8, u8, u8) = (0x6A, 0x1B, 0x9A);
}

fn to_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn to_ansi((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

fn priority_rgb(priority: Priority) -> (u8, u8, u8) {
    match priority {
        Priority::High => rgb::HIGH,
        Priority::Medium => rgb::MEDIUM,
        Priority::Low => rgb::LOW,
    }
}

fn status_rgb(task: &Task) -> (u8, u8, u8) {
    if task.is_completed() {
        rgb::COMPLETED
    } else {
        priority_rgb(task.priority())
    }
}

/// Color for a priority.
pub fn priority_color(priority: Priority) -> Color {
    to_color(priority_rgb(priority))
}

/// Status indicator color: green once completed, priority color otherwise.
pub fn status_color(task: &Task) -> Color {
    to_color(status_rgb(task))
}

/// Accent used for titles and the close button.
pub fn accent() -> Color {
    to_color(rgb::ACCENT)
}

/// Color of the feedback pulse indicator.
pub fn pulse_color(intensity: Intensity) -> Color {
    match intensity {
        Intensity::Light => Color::Cyan,
        Intensity::Medium => Color::Yellow,
    }
}

/// Wrap text in the priority's ANSI color.
pub fn priority(text: &str, priority: Priority) -> String {
    format!("{}{}{}", to_ansi(priority_rgb(priority)), text, RESET)
}

/// Status dot for a task in ANSI color.
pub fn status_dot(task: &Task) -> String {
    format!("{}\u{25cf}{}", to_ansi(status_rgb(task)), RESET)
}

/// Completed task text (dim + struck through).
pub fn completed_text(text: &str) -> String {
    format!("{}{}{}{}", DIM, STRIKE, text, RESET)
}

/// Color success messages (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", GREEN, text, RESET)
}

/// Color error messages (red).
pub fn error(text: &str) -> String {
    format!("{}{}{}", RED, text, RESET)
}

/// Color warning messages (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", YELLOW, text, RESET)
}

/// Color info messages (cyan).
pub fn info(text: &str) -> String {
    format!("{}{}{}", CYAN, text, RESET)
}

/// Color a label (bold).
pub fn label(text: &str) -> String {
    format!("{}{}{}", BOLD, text, RESET)
}
