use tasklink_protocol::{ListsConsumer, Scope, TasksConsumer};

/// The scope consumers for one inbound dispatch.
///
/// The UI owns its screens; it lends them here for the duration of a single
/// message so the dispatcher sees their current activity.
pub struct ConsumerRegistry<'a> {
    pub lists: &'a mut dyn ListsConsumer,
    pub tasks: &'a mut dyn TasksConsumer,
}

impl<'a> ConsumerRegistry<'a> {
    pub fn new(lists: &'a mut dyn ListsConsumer, tasks: &'a mut dyn TasksConsumer) -> Self {
        Self { lists, tasks }
    }

    pub fn is_active(&self, scope: Scope) -> bool {
        match scope {
            Scope::Lists => self.lists.is_active(),
            Scope::Tasks => self.tasks.is_active(),
        }
    }
}
