//! Task model.
//!
//! A task is a single to-do entry: free text, a completion flag, a creation
//! timestamp and a priority drawn at random when the task is created.

mod model;


pub use model::{Priority, Task, TaskId};
