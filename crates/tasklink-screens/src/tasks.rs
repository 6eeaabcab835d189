use serde::Serialize;
use tasklink_protocol::{ListId, TaskId, TaskItem, TasksConsumer};
use tracing::debug;

use crate::slots::Slots;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub done: bool,
}

/// The screen listing the tasks of one list.
#[derive(Debug, Default)]
pub struct TasksScreen {
    list: Option<(ListId, String)>,
    tasks: Slots<Task>,
}

impl TasksScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the screen on `list_id`, dropping tasks of any previous list.
    pub fn show(&mut self, list_id: ListId, title: impl Into<String>) {
        self.list = Some((list_id, title.into()));
        self.tasks.clear();
    }

    pub fn hide(&mut self) {
        self.list = None;
        self.tasks.clear();
    }

    pub fn is_shown(&self) -> bool {
        self.list.is_some()
    }

    pub fn list_title(&self) -> Option<&str> {
        self.list.as_ref().map(|(_, title)| title.as_str())
    }

    pub fn count(&self) -> Option<usize> {
        self.tasks.count()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn is_loaded(&self) -> bool {
        self.tasks.is_complete()
    }
}

impl TasksConsumer for TasksScreen {
    fn is_active(&self) -> bool {
        self.list.is_some()
    }

    fn current_list_id(&self) -> Option<ListId> {
        self.list.as_ref().map(|(list_id, _)| *list_id)
    }

    fn set_count(&mut self, count: usize) {
        debug!(count, "tasks count");
        self.tasks.reset(count);
    }

    fn set_item(&mut self, item: TaskItem<'_>) {
        self.tasks.fill(
            item.index,
            Task {
                id: item.task_id,
                title: item.title.to_owned(),
                notes: item.notes.map(str::to_owned),
                done: item.done,
            },
        );
    }
}
