//! Task list controller.
//!
//! Owns the task list, the draft of the next task and the detail-view
//! selection. Every operation is total: unknown ids are no-ops and a blank
//! draft is silently rejected.

use chrono::Local;
use rand::RngCore;

use crate::feedback::{Feedback, Intensity, Silent};
use crate::task::{Priority, Task, TaskId};

/// Detail view state. `Open` holds a lookup key, never a copy of the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailView {
    #[default]
    Closed,
    Open(TaskId),
}

impl DetailView {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::Open(id) => Some(*id),
            Self::Closed => None,
        }
    }
}

/// A user intent forwarded by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the draft text verbatim.
    SetDraft(String),
    /// Submit the current draft as a new task.
    Add,
    Delete(TaskId),
    Toggle(TaskId),
    Select(TaskId),
    CloseDetails,
}

/// What applying an [`Intent`] did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    DraftChanged,
    Added(TaskId),
    /// The draft was blank; nothing was added.
    Rejected,
    Deleted(TaskId),
    Toggled { id: TaskId, completed: bool },
    Opened(TaskId),
    Closed,
    /// The intent referenced an id that is not in the list.
    Missing(TaskId),
}

/// Owner of all application state.
pub struct TaskController<R> {
    tasks: Vec<Task>,
    draft: String,
    detail: DetailView,
    next_id: u64,
    rng: R,
    feedback: Box<dyn Feedback>,
}

impl<R: RngCore> TaskController<R> {
    /// Create an empty controller drawing priorities from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            tasks: Vec::new(),
            draft: String::new(),
            detail: DetailView::Closed,
            next_id: 1,
            rng,
            feedback: Box::new(Silent),
        }
    }

    /// Replace the feedback sink.
    pub fn with_feedback(mut self, feedback: impl Feedback + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    /// Apply an intent and report what changed.
    pub fn apply(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::SetDraft(text) => {
                self.set_draft(text);
                Outcome::DraftChanged
            }
            Intent::Add => match self.add_task() {
                Some(id) => Outcome::Added(id),
                None => Outcome::Rejected,
            },
            Intent::Delete(id) => {
                if self.delete_task(id) {
                    Outcome::Deleted(id)
                } else {
                    Outcome::Missing(id)
                }
            }
            Intent::Toggle(id) => match self.toggle_completion(id) {
                Some(completed) => Outcome::Toggled { id, completed },
                None => Outcome::Missing(id),
            },
            Intent::Select(id) => {
                if self.select_task(id) {
                    Outcome::Opened(id)
                } else {
                    Outcome::Missing(id)
                }
            }
            Intent::CloseDetails => {
                self.close_details();
                Outcome::Closed
            }
        }
    }

    /// Replace the draft text. No validation happens until submission.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submit the draft as a new task.
    ///
    /// A draft that trims to nothing is ignored and left in place. On success
    /// the draft is cleared and the new task is appended to the end.
    pub fn add_task(&mut self) -> Option<TaskId> {
        if self.draft.trim().is_empty() {
            return None;
        }

        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        let priority = Priority::random(&mut self.rng);
        let text = std::mem::take(&mut self.draft);
        self.tasks.push(Task::new(id, text, priority, Local::now()));

        self.feedback.notify(Intensity::Light);
        Some(id)
    }

    /// Submit `text` as a new task, bypassing the draft.
    ///
    /// Rejected text leaves the draft as it was.
    pub fn add_text(&mut self, text: impl Into<String>) -> Option<TaskId> {
        let previous = std::mem::replace(&mut self.draft, text.into());
        let added = self.add_task();
        if added.is_none() {
            self.draft = previous;
        }
        added
    }

    /// Remove a task. Closes the detail view if it was showing that task.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        self.feedback.notify(Intensity::Medium);

        let before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);
        let removed = self.tasks.len() != before;

        if self.detail == DetailView::Open(id) {
            self.detail = DetailView::Closed;
        }
        removed
    }

    /// Flip a task's completion flag. Returns the new value.
    pub fn toggle_completion(&mut self, id: TaskId) -> Option<bool> {
        self.feedback.notify(Intensity::Light);
        self.tasks
            .iter_mut()
            .find(|t| t.id() == id)
            .map(|t| t.toggle())
    }

    /// Open the detail view on a task. Unknown ids leave the view unchanged.
    pub fn select_task(&mut self, id: TaskId) -> bool {
        if self.task(id).is_none() {
            return false;
        }
        self.feedback.notify(Intensity::Light);
        self.detail = DetailView::Open(id);
        true
    }

    pub fn close_details(&mut self) {
        self.detail = DetailView::Closed;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn detail(&self) -> DetailView {
        self.detail
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.detail.task_id()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_task_id().and_then(|id| self.task(id))
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len() - self.completed_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seeded_controller, RecordingFeedback};
    use rand::rngs::StdRng;
    use crate::feedback::ChannelFeedback;
    use rand::SeedableRng;
    use std::sync::mpsc;

    #[test]
    fn test_add_appends_pending_task_and_clears_draft() {
        let mut ctl = seeded_controller(1);
        ctl.set_draft("Buy milk");
        let id = ctl.add_task().unwrap();

        assert_eq!(ctl.len(), 1);
        let task = ctl.task(id).unwrap();
        assert_eq!(task.text(), "Buy milk");
        assert!(!task.is_completed());
        assert!(Priority::ALL.contains(&task.priority()));
        assert_eq!(ctl.draft(), "");
    }

    #[test]
    fn test_add_rejects_blank_drafts() {
        let mut ctl = seeded_controller(1);
        for blank in ["", " ", "  ", "\t", "\n \t ", "\u{3000}"] {
            ctl.set_draft(blank);
            assert_eq!(ctl.add_task(), None, "accepted {:?}", blank);
            // Draft is left as typed
            assert_eq!(ctl.draft(), blank);
        }
        assert!(ctl.is_empty());
    }

    #[test]
    fn test_rejected_add_text_is_a_no_op() {
        let mut ctl = seeded_controller(1);
        ctl.set_draft("half typed");

        assert_eq!(ctl.add_text("   "), None);
        assert!(ctl.is_empty());
        assert_eq!(ctl.draft(), "half typed");

        // Accepted text consumes the draft slot
        assert!(ctl.add_text("Buy milk").is_some());
        assert_eq!(ctl.draft(), "");
    }

    #[test]
    fn test_add_keeps_text_verbatim() {
        let mut ctl = seeded_controller(1);
        let id = ctl.add_text("  padded  ").unwrap();
        assert_eq!(ctl.task(id).unwrap().text(), "  padded  ");
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut ctl = seeded_controller(1);
        ctl.add_text("first");
        ctl.add_text("second");
        ctl.add_text("third");

        let texts: Vec<&str> = ctl.tasks().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut ctl = seeded_controller(1);
        let a = ctl.add_text("a").unwrap();
        let b = ctl.add_text("b").unwrap();
        ctl.delete_task(b);
        let c = ctl.add_text("c").unwrap();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_same_seed_same_priorities() {
        let mut one = seeded_controller(99);
        let mut two = seeded_controller(99);
        for i in 0..20 {
            one.add_text(format!("task {}", i));
            two.add_text(format!("task {}", i));
        }
        let p1: Vec<Priority> = one.tasks().iter().map(|t| t.priority()).collect();
        let p2: Vec<Priority> = two.tasks().iter().map(|t| t.priority()).collect();
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut ctl = seeded_controller(1);
        let id = ctl.add_text("Buy milk").unwrap();

        assert_eq!(ctl.toggle_completion(id), Some(true));
        assert_eq!(ctl.toggle_completion(id), Some(false));
        assert!(!ctl.task(id).unwrap().is_completed());
    }

    #[test]
    fn test_toggle_only_touches_target() {
        let mut ctl = seeded_controller(1);
        let a = ctl.add_text("a").unwrap();
        let b = ctl.add_text("b").unwrap();

        ctl.toggle_completion(b);
        assert!(!ctl.task(a).unwrap().is_completed());
        assert!(ctl.task(b).unwrap().is_completed());
        assert_eq!(ctl.completed_count(), 1);
        assert_eq!(ctl.pending_count(), 1);
    }

    #[test]
    fn test_toggle_missing_is_noop() {
        let mut ctl = seeded_controller(1);
        ctl.add_text("a");
        let snapshot = ctl.tasks().to_vec();

        assert_eq!(ctl.toggle_completion(TaskId::new(404)), None);
        assert_eq!(ctl.tasks(), snapshot.as_slice());
    }

    #[test]
    fn test_delete_twice_is_idempotent() {
        let mut ctl = seeded_controller(1);
        let a = ctl.add_text("a").unwrap();
        ctl.add_text("b");

        assert!(ctl.delete_task(a));
        let after_first = ctl.tasks().to_vec();
        assert!(!ctl.delete_task(a));
        assert_eq!(ctl.tasks(), after_first.as_slice());
    }

    #[test]
    fn test_delete_keeps_remaining_order() {
        let mut ctl = seeded_controller(1);
        ctl.add_text("a");
        let b = ctl.add_text("b").unwrap();
        ctl.add_text("c");

        ctl.delete_task(b);
        let texts: Vec<&str> = ctl.tasks().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_select_and_close_details() {
        let mut ctl = seeded_controller(1);
        let id = ctl.add_text("a").unwrap();

        assert!(ctl.select_task(id));
        assert_eq!(ctl.detail(), DetailView::Open(id));
        assert_eq!(ctl.selected_task().unwrap().text(), "a");

        ctl.close_details();
        assert_eq!(ctl.detail(), DetailView::Closed);
        assert_eq!(ctl.selected_task_id(), None);
    }

    #[test]
    fn test_select_missing_keeps_view_closed() {
        let mut ctl = seeded_controller(1);
        assert!(!ctl.select_task(TaskId::new(3)));
        assert!(!ctl.detail().is_open());
    }

    #[test]
    fn test_select_another_task_switches_view() {
        let mut ctl = seeded_controller(1);
        let a = ctl.add_text("a").unwrap();
        let b = ctl.add_text("b").unwrap();

        ctl.select_task(a);
        ctl.select_task(b);
        assert_eq!(ctl.selected_task_id(), Some(b));
    }

    #[test]
    fn test_deleting_selected_task_closes_details() {
        let mut ctl = seeded_controller(1);
        let id = ctl.add_text("a").unwrap();
        ctl.select_task(id);

        ctl.delete_task(id);
        assert_eq!(ctl.detail(), DetailView::Closed);
        assert!(ctl.selected_task().is_none());
    }

    #[test]
    fn test_deleting_other_task_keeps_details_open() {
        let mut ctl = seeded_controller(1);
        let a = ctl.add_text("a").unwrap();
        let b = ctl.add_text("b").unwrap();
        ctl.select_task(a);

        ctl.delete_task(b);
        assert_eq!(ctl.detail(), DetailView::Open(a));
    }

    #[test]
    fn test_feedback_pulses() {
        let recorder = RecordingFeedback::new();
        let mut ctl =
            TaskController::new(StdRng::seed_from_u64(5)).with_feedback(recorder.clone());

        let id = ctl.add_text("a").unwrap();
        ctl.toggle_completion(id);
        ctl.select_task(id);
        ctl.close_details();
        ctl.delete_task(id);

        assert_eq!(
            recorder.pulses(),
            vec![
                Intensity::Light,
                Intensity::Light,
                Intensity::Light,
                Intensity::Medium
            ]
        );
    }

    #[test]
    fn test_no_feedback_for_rejected_add_or_missing_select() {
        let recorder = RecordingFeedback::new();
        let mut ctl =
            TaskController::new(StdRng::seed_from_u64(5)).with_feedback(recorder.clone());

        ctl.add_text("   ");
        ctl.select_task(TaskId::new(1));
        ctl.set_draft("typing");

        assert!(recorder.pulses().is_empty());
    }

    #[test]
    fn test_apply_reports_outcomes() {
        let mut ctl = seeded_controller(1);

        assert_eq!(ctl.apply(Intent::SetDraft("Buy milk".into())), Outcome::DraftChanged);
        let id = match ctl.apply(Intent::Add) {
            Outcome::Added(id) => id,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert_eq!(ctl.apply(Intent::Add), Outcome::Rejected);
        assert_eq!(
            ctl.apply(Intent::Toggle(id)),
            Outcome::Toggled { id, completed: true }
        );
        assert_eq!(ctl.apply(Intent::Select(id)), Outcome::Opened(id));
        assert_eq!(ctl.apply(Intent::CloseDetails), Outcome::Closed);
        assert_eq!(ctl.apply(Intent::Delete(id)), Outcome::Deleted(id));
        assert_eq!(ctl.apply(Intent::Delete(id)), Outcome::Missing(id));
        assert_eq!(ctl.apply(Intent::Toggle(id)), Outcome::Missing(id));
    }

    #[test]
    fn test_buy_milk_scenario() {
        let mut ctl = seeded_controller(3);
        assert!(ctl.is_empty());

        let id = ctl.add_text("Buy milk").unwrap();
        assert_eq!(ctl.len(), 1);
        assert_eq!(ctl.tasks()[0].text(), "Buy milk");
        assert!(!ctl.tasks()[0].is_completed());

        ctl.toggle_completion(id);
        assert!(ctl.task(id).unwrap().is_completed());

        ctl.delete_task(id);
        assert!(ctl.is_empty());
    }

    #[test]
    fn test_missing_ids_still_pulse_on_delete_and_toggle() {
        let recorder = RecordingFeedback::new();
        let mut ctl =
            TaskController::new(StdRng::seed_from_u64(5)).with_feedback(recorder.clone());
        let id = ctl.add_text("a").unwrap();
        ctl.delete_task(id);
        let before = recorder.pulses().len();

        assert!(!ctl.delete_task(id));
        assert_eq!(ctl.toggle_completion(id), None);

        assert_eq!(
            &recorder.pulses()[before..],
            &[Intensity::Medium, Intensity::Light]
        );
        assert!(ctl.is_empty());
    }

    #[test]
    fn test_closed_feedback_channel_does_not_affect_state() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut ctl = seeded_controller(8).with_feedback(ChannelFeedback::new(tx));

        let a = ctl.add_text("a").unwrap();
        let b = ctl.add_text("b").unwrap();
        assert_eq!(ctl.toggle_completion(a), Some(true));
        assert!(ctl.select_task(b));
        assert!(ctl.delete_task(b));

        assert_eq!(ctl.len(), 1);
        assert!(ctl.task(a).unwrap().is_completed());
        assert_eq!(ctl.detail(), DetailView::Closed);
    }
}
