//! Recording doubles for the host ports.

use tasklink_protocol::{
    Dictionary, ListId, ListItem, ListsConsumer, MessageKey, Opcode, Scope, StatusLine, TaskItem,
    TasksConsumer, Transport, TransportError,
};

#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub opened: Option<(usize, usize)>,
    pub closed: bool,
    pub staged: Option<Dictionary>,
    pub stage_calls: usize,
    pub transmitted: Vec<Dictionary>,
    /// Error returned by the next `transmit`.
    pub fail_next: Option<TransportError>,
}

impl Transport for RecordingTransport {
    fn open(&mut self, inbox_size: usize, outbox_size: usize) -> Result<(), TransportError> {
        self.opened = Some((inbox_size, outbox_size));
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn stage(&mut self, message: Dictionary) -> Result<(), TransportError> {
        self.stage_calls += 1;
        self.staged = Some(message);
        Ok(())
    }

    fn transmit(&mut self) -> Result<(), TransportError> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }
        let message = self.staged.clone().ok_or(TransportError::Other(-1))?;
        self.transmitted.push(message);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingStatus {
    pub shown: Vec<String>,
    pub hides: usize,
}

impl StatusLine for RecordingStatus {
    fn show(&mut self, text: &str) {
        self.shown.push(text.to_owned());
    }

    fn hide(&mut self) {
        self.hides += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedListItem {
    pub index: usize,
    pub list_id: ListId,
    pub title: String,
    pub size: usize,
}

#[derive(Debug, Default)]
pub struct RecordingLists {
    pub active: bool,
    pub count: Option<usize>,
    pub items: Vec<OwnedListItem>,
}

impl RecordingLists {
    pub fn active() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }
}

impl ListsConsumer for RecordingLists {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_count(&mut self, count: usize) {
        self.count = Some(count);
    }

    fn set_item(&mut self, item: ListItem<'_>) {
        self.items.push(OwnedListItem {
            index: item.index,
            list_id: item.list_id,
            title: item.title.to_owned(),
            size: item.size,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedTaskItem {
    pub index: usize,
    pub title: String,
    pub notes: Option<String>,
    pub done: bool,
}

#[derive(Debug, Default)]
pub struct RecordingTasks {
    pub active: bool,
    pub list_id: Option<ListId>,
    pub count: Option<usize>,
    pub items: Vec<OwnedTaskItem>,
}

impl RecordingTasks {
    pub fn showing(list_id: ListId) -> Self {
        Self {
            active: true,
            list_id: Some(list_id),
            ..Self::default()
        }
    }
}

impl TasksConsumer for RecordingTasks {
    fn is_active(&self) -> bool {
        self.active
    }

    fn current_list_id(&self) -> Option<ListId> {
        self.list_id
    }

    fn set_count(&mut self, count: usize) {
        self.count = Some(count);
    }

    fn set_item(&mut self, item: TaskItem<'_>) {
        self.items.push(OwnedTaskItem {
            index: item.index,
            title: item.title.to_owned(),
            notes: item.notes.map(str::to_owned),
            done: item.done,
        });
    }
}

pub fn ready() -> Dictionary {
    Dictionary::new().with(MessageKey::Code, Opcode::Ready.wire())
}

pub fn array_start(scope: Scope, count: usize) -> Dictionary {
    Dictionary::new()
        .with(MessageKey::Code, Opcode::ArrayStart.wire())
        .with(MessageKey::Scope, scope.wire())
        .with(MessageKey::Count, count as i64)
}

pub fn array_end(scope: Scope) -> Dictionary {
    Dictionary::new()
        .with(MessageKey::Code, Opcode::ArrayEnd.wire())
        .with(MessageKey::Scope, scope.wire())
}

pub fn list_item(index: usize, list_id: i32, title: &str, size: usize) -> Dictionary {
    Dictionary::new()
        .with(MessageKey::Code, Opcode::ArrayItem.wire())
        .with(MessageKey::Scope, Scope::Lists.wire())
        .with(MessageKey::Item, index as i64)
        .with(MessageKey::ListId, list_id)
        .with(MessageKey::Title, title)
        .with(MessageKey::Size, size as i64)
}

pub fn task_item(index: usize, task_id: i32, title: &str, done: bool) -> Dictionary {
    Dictionary::new()
        .with(MessageKey::Code, Opcode::ArrayItem.wire())
        .with(MessageKey::Scope, Scope::Tasks.wire())
        .with(MessageKey::Item, index as i64)
        .with(MessageKey::TaskId, task_id)
        .with(MessageKey::Title, title)
        .with(MessageKey::IsDone, done)
}
