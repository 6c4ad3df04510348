//! A running session: the controller plus its session log.
//!
//! Front-ends never touch the controller's mutating methods directly; they
//! build [`Intent`]s and hand them to [`Session::dispatch`].

use rand::RngCore;

use crate::controller::{Intent, Outcome, TaskController};
use crate::log::SessionLogger;

pub struct Session<R> {
    controller: TaskController<R>,
    logger: Option<SessionLogger>,
    log_error: Option<String>,
}

impl<R: RngCore> Session<R> {
    pub fn new(controller: TaskController<R>) -> Self {
        Self {
            controller,
            logger: None,
            log_error: None,
        }
    }

    /// Attach a session log.
    pub fn with_logger(mut self, logger: SessionLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn controller(&self) -> &TaskController<R> {
        &self.controller
    }

    /// Write the session banner, if logging.
    pub fn start(&mut self, mode: &str) {
        let result = match self.logger {
            Some(ref logger) => logger.log_session_start(mode),
            None => Ok(()),
        };
        if let Err(e) = result {
            self.record_log_error(e.to_string());
        }
    }

    /// Apply an intent and log the outcome.
    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        let outcome = self.controller.apply(intent);
        if let Some((action, message)) = self.describe(outcome) {
            let result = match self.logger {
                Some(ref logger) => logger.log(action, &message),
                None => Ok(()),
            };
            if let Err(e) = result {
                self.record_log_error(e.to_string());
            }
        }
        outcome
    }

    /// The first log write failure, if any. Taking it clears it; later
    /// failures are not reported again.
    pub fn take_log_error(&mut self) -> Option<String> {
        self.log_error.take()
    }

    fn record_log_error(&mut self, msg: String) {
        if self.log_error.is_none() {
            self.log_error = Some(msg);
        }
        // One failure is enough; stop writing to a broken log.
        self.logger = None;
    }

    fn describe(&self, outcome: Outcome) -> Option<(&'static str, String)> {
        match outcome {
            Outcome::DraftChanged => None,
            Outcome::Added(id) => {
                let task = self.controller.task(id)?;
                Some((
                    "added",
                    format!("{} {} ({})", id, task.text(), task.priority()),
                ))
            }
            Outcome::Rejected => Some(("rejected", "blank task text".to_string())),
            Outcome::Deleted(id) => Some(("deleted", id.to_string())),
            Outcome::Toggled { id, completed } => Some((
                "toggled",
                format!("{} {}", id, if completed { "completed" } else { "pending" }),
            )),
            Outcome::Opened(id) => Some(("opened", id.to_string())),
            Outcome::Closed => Some(("closed", String::new())),
            Outcome::Missing(id) => Some(("missing", id.to_string())),
        }
    }
}
