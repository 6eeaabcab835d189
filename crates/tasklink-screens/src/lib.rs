//! In-memory screens implementing the tasklink consumer ports.
//!
//! These hold what the watch UI would render: the list collection, the
//! tasks of the open list, a task's detail, and the status bar. Rendering
//! itself is not modelled.

mod lists;
mod slots;
mod status;
mod task;
mod tasks;

pub use lists::{ListsScreen, TaskList};
pub use slots::Slots;
pub use status::StatusBar;
pub use task::TaskScreen;
pub use tasks::{Task, TasksScreen};
