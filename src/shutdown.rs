//! Ctrl+C handling for line mode.
//!
//! The TUI runs in raw mode and sees Ctrl+C as a key press. Line mode reads
//! stdin in cooked mode, so an interrupt arrives as a signal instead: the
//! first one asks the command loop to stop after the current line, and
//! repeated ones force the process to exit.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Global flag indicating shutdown has been requested.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Counter for how many times Ctrl+C was pressed (for force-quit on repeated presses).
static INTERRUPT_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Maximum number of interrupts before force-quitting.
const MAX_INTERRUPTS: usize = 3;

/// Register the Ctrl+C handler.
///
/// Should be called once at program startup.
pub fn register_handler() -> Result<(), String> {
    ctrlc::set_handler(move || {
        let count = INTERRUPT_COUNT.fetch_add(1, Ordering::SeqCst) + 1;

        if count >= MAX_INTERRUPTS {
            eprintln!("\nForce quit (received {} interrupts)", count);
            std::process::exit(130); // Standard exit code for Ctrl+C
        }

        if count == 1 {
            eprintln!();
            eprintln!("Interrupt received. Unsaved tasks will be discarded.");
            eprintln!(
                "Press Enter to finish, or Ctrl+C {} more time(s) to force quit.",
                MAX_INTERRUPTS - count
            );
            SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
        } else {
            eprintln!("(Press Ctrl+C {} more time(s) to force quit)", MAX_INTERRUPTS - count);
        }
    })
    .map_err(|e| format!("failed to register Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested.
pub fn requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

/// Clear the shutdown flag and interrupt counter.
#[cfg(test)]
fn reset() {
    SHUTDOWN_REQUESTED.store(false, Ordering::SeqCst);
    INTERRUPT_COUNT.store(0, Ordering::SeqCst);
}

/// A cloneable handle to check shutdown status.
#[derive(Clone)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
    follow_global: bool,
}

impl ShutdownSignal {
    /// A signal that also trips when the global Ctrl+C flag is set.
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            follow_global: true,
        }
    }

    /// A signal that only trips through [`ShutdownSignal::trigger`].
    pub fn detached() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            follow_global: false,
        }
    }

    pub fn is_shutdown(&self) -> bool {
        (self.follow_global && requested()) || self.flag.load(Ordering::SeqCst)
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
