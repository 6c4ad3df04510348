//! Test utilities for taskpad.
//!
//! Shared helpers for unit and integration tests: a feedback sink that
//! records pulses and a controller with a seeded random source.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::controller::TaskController;
use crate::feedback::{Feedback, Intensity};

/// Feedback sink that remembers every pulse.
///
/// Clones share the same record, so a test can keep one handle and give the
/// other to the controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    pulses: Arc<Mutex<Vec<Intensity>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pulses received so far, oldest first.
    pub fn pulses(&self) -> Vec<Intensity> {
        self.pulses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Feedback for RecordingFeedback {
    fn notify(&self, intensity: Intensity) {
        self.pulses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(intensity);
    }
}

/// A controller with a deterministic priority sequence.
pub fn seeded_controller(seed: u64) -> TaskController<StdRng> {
    TaskController::new(StdRng::seed_from_u64(seed))
}
