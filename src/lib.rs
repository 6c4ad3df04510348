//! Taskpad: a single-screen terminal task list.
//!
//! Tasks live in memory for one session. Each new task gets a random
//! priority, can be toggled between pending and completed, opened in a
//! details view, and deleted. Every user action emits a short feedback
//! pulse through a pluggable [`feedback::Feedback`] device.
//!
//! ## Front-ends
//!
//! - [`tui`] - full-screen ratatui interface with keyboard and mouse input
//! - [`plain`] - one command per line, for pipes and dumb terminals
//!
//! Both drive the same [`controller::TaskController`] through a
//! [`session::Session`], which also writes the optional session log.

pub mod color;
pub mod config;
pub mod controller;
pub mod feedback;
pub mod log;
pub mod plain;
pub mod session;
pub mod shutdown;
pub mod task;
#[doc(hidden)]
pub mod testutil;
pub mod tui;
