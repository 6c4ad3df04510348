//! Feedback signal for user actions.
//!
//! The controller pulses a [`Feedback`] sink after adds, deletes, toggles and
//! selections. Sinks are fire-and-forget: they never block the caller and
//! never report failure back into application state.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::thread;

/// Strength of a feedback pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intensity {
    Light,
    Medium,
}

/// A best-effort feedback sink.
pub trait Feedback: Send {
    /// Emit a pulse. Must return without waiting on the device.
    fn notify(&self, intensity: Intensity);
}

/// Discards every pulse.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Feedback for Silent {
    fn notify(&self, _intensity: Intensity) {}
}

/// Posts pulses to a channel drained by the presentation layer.
///
/// A closed receiver is ignored.
pub struct ChannelFeedback {
    tx: Sender<Intensity>,
}

impl ChannelFeedback {
    pub fn new(tx: Sender<Intensity>) -> Self {
        Self { tx }
    }
}

impl Feedback for ChannelFeedback {
    fn notify(&self, intensity: Intensity) {
        let _ = self.tx.send(intensity);
    }
}

/// Rings the terminal bell on stderr from a detached thread.
///
/// Medium pulses ring twice.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellFeedback;

impl Feedback for BellFeedback {
    fn notify(&self, intensity: Intensity) {
        let bell: &'static [u8] = match intensity {
            Intensity::Light => b"\x07",
            Intensity::Medium => b"\x07\x07",
        };
        // The handle is dropped on purpose: nobody waits for the bell.
        let _ = thread::Builder::new()
            .name("taskpad-bell".to_string())
            .spawn(move || {
                let mut stderr = io::stderr();
                let _ = stderr.write_all(bell);
                let _ = stderr.flush();
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_channel_feedback_delivers_pulses_in_order() {
        let (tx, rx) = mpsc::channel();
        let feedback = ChannelFeedback::new(tx);

        feedback.notify(Intensity::Light);
        feedback.notify(Intensity::Medium);

        let received: Vec<Intensity> = rx.try_iter().collect();
        assert_eq!(received, vec![Intensity::Light, Intensity::Medium]);
    }

    #[test]
    fn test_channel_feedback_ignores_closed_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let feedback = ChannelFeedback::new(tx);

        // Must not panic
        feedback.notify(Intensity::Medium);
    }

    #[test]
    fn test_silent_and_bell_do_not_block() {
        Silent.notify(Intensity::Light);
        BellFeedback.notify(Intensity::Light);
    }
}
