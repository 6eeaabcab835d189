use serde::Serialize;
use tasklink_protocol::{ListId, ListItem, ListsConsumer};
use tracing::debug;

use crate::slots::Slots;

/// A task list as shown in the list-collection screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskList {
    pub id: ListId,
    pub title: String,
    /// Number of tasks in the list.
    pub size: usize,
}

/// The screen listing every task list.
#[derive(Debug, Default)]
pub struct ListsScreen {
    shown: bool,
    lists: Slots<TaskList>,
}

impl ListsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self) {
        self.shown = true;
    }

    /// Leaves the screen; its contents are dropped with it.
    pub fn hide(&mut self) {
        self.shown = false;
        self.lists.clear();
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn count(&self) -> Option<usize> {
        self.lists.count()
    }

    pub fn get(&self, index: usize) -> Option<&TaskList> {
        self.lists.get(index)
    }

    pub fn lists(&self) -> impl Iterator<Item = &TaskList> {
        self.lists.iter()
    }

    pub fn is_loaded(&self) -> bool {
        self.lists.is_complete()
    }
}

impl ListsConsumer for ListsScreen {
    fn is_active(&self) -> bool {
        self.shown
    }

    fn set_count(&mut self, count: usize) {
        debug!(count, "lists count");
        self.lists.reset(count);
    }

    fn set_item(&mut self, item: ListItem<'_>) {
        self.lists.fill(
            item.index,
            TaskList {
                id: item.list_id,
                title: item.title.to_owned(),
                size: item.size,
            },
        );
    }
}
