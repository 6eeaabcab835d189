use tasklink_protocol::{ListId, TaskId};
use tracing::debug;

use crate::tasks::Task;

/// Detail view of a single task.
#[derive(Debug, Default)]
pub struct TaskScreen {
    shown: Option<(ListId, Task)>,
}

impl TaskScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, list_id: ListId, task: &Task) {
        debug!(list_id = %list_id, task_id = %task.id, "showing task");
        self.shown = Some((list_id, task.clone()));
    }

    pub fn hide(&mut self) {
        self.shown = None;
    }

    pub fn is_shown(&self) -> bool {
        self.shown.is_some()
    }

    pub fn current_list_id(&self) -> Option<ListId> {
        self.shown.as_ref().map(|(list_id, _)| *list_id)
    }

    pub fn current_task_id(&self) -> Option<TaskId> {
        self.shown.as_ref().map(|(_, task)| task.id)
    }

    pub fn task(&self) -> Option<&Task> {
        self.shown.as_ref().map(|(_, task)| task)
    }
}
