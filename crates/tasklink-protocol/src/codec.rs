//! Wire codec: requests out, decoded views in.
//!
//! Inbound decoding is split by stage so the dispatcher can check a scope's
//! activity before touching the rest of the payload. Decoded items borrow
//! their text from the inbound dictionary; consumers copy what they keep.

use crate::error::ProtocolResult;
use crate::ids::{ListId, TaskId};
use crate::keys::{MessageKey, Opcode, Scope};
use crate::message::Dictionary;

/// A logical request to the companion. Built per call and encoded at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub opcode: Opcode,
    pub scope: Scope,
    pub list_id: Option<ListId>,
    pub task_id: Option<TaskId>,
}

impl Request {
    /// All task lists.
    pub fn listing() -> Self {
        Self {
            opcode: Opcode::Get,
            scope: Scope::Lists,
            list_id: None,
            task_id: None,
        }
    }

    /// Tasks of one list.
    pub fn tasks(list_id: ListId) -> Self {
        Self {
            opcode: Opcode::Get,
            scope: Scope::Tasks,
            list_id: Some(list_id),
            task_id: None,
        }
    }

    /// A single task of one list.
    pub fn task_details(list_id: ListId, task_id: TaskId) -> Self {
        Self {
            opcode: Opcode::Get,
            scope: Scope::Tasks,
            list_id: Some(list_id),
            task_id: Some(task_id),
        }
    }

    pub fn encode(&self) -> Dictionary {
        let mut message = Dictionary::new().with(MessageKey::Code, self.opcode.wire());
        if !self.opcode.is_control() {
            message.insert(MessageKey::Scope, self.scope.wire());
        }
        if let Some(list_id) = self.list_id {
            message.insert(MessageKey::ListId, list_id.get());
        }
        if let Some(task_id) = self.task_id {
            message.insert(MessageKey::TaskId, task_id.get());
        }
        message
    }
}

/// First decoding stage of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header<'a> {
    /// Companion failure report. `message` is absent when the field is
    /// missing or not text.
    Error { message: Option<&'a str> },
    /// Readiness handshake.
    Ready,
    /// Data-bearing message. Both values are raw so unknown opcodes and
    /// scopes can be reported rather than rejected.
    Scoped { code: i64, scope: i64 },
}

impl Header<'_> {
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            Header::Error { .. } => Some(Opcode::Error),
            Header::Ready => Some(Opcode::Ready),
            Header::Scoped { code, .. } => Opcode::from_wire(*code),
        }
    }
}

pub fn decode_header(message: &Dictionary) -> ProtocolResult<Header<'_>> {
    let code = message.int(MessageKey::Code)?;
    match Opcode::from_wire(code) {
        Some(Opcode::Error) => Ok(Header::Error {
            message: message.optional_text(MessageKey::Error),
        }),
        Some(Opcode::Ready) => Ok(Header::Ready),
        _ => {
            let scope = message.int(MessageKey::Scope)?;
            Ok(Header::Scoped { code, scope })
        }
    }
}

/// Announcement of an upcoming array transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayStart {
    pub count: usize,
    /// List the transfer belongs to; always present for `Scope::Tasks`.
    pub list_id: Option<ListId>,
}

pub fn decode_array_start(message: &Dictionary, scope: Scope) -> ProtocolResult<ArrayStart> {
    let count = message.index(MessageKey::Count)?;
    let list_id = match scope {
        Scope::Lists => None,
        Scope::Tasks => Some(ListId::new(message.int32(MessageKey::ListId)?)),
    };
    Ok(ArrayStart { count, list_id })
}

/// One task list within a `Scope::Lists` transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub index: usize,
    pub list_id: ListId,
    pub title: &'a str,
    /// Number of tasks in the list.
    pub size: usize,
}

pub fn decode_list_item(message: &Dictionary) -> ProtocolResult<ListItem<'_>> {
    Ok(ListItem {
        index: message.index(MessageKey::Item)?,
        list_id: ListId::new(message.int32(MessageKey::ListId)?),
        title: message.text(MessageKey::Title)?,
        size: message.index(MessageKey::Size)?,
    })
}

/// One task within a `Scope::Tasks` transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskItem<'a> {
    pub index: usize,
    pub task_id: TaskId,
    pub title: &'a str,
    pub notes: Option<&'a str>,
    pub done: bool,
}

pub fn decode_task_item(message: &Dictionary) -> ProtocolResult<TaskItem<'_>> {
    Ok(TaskItem {
        index: message.index(MessageKey::Item)?,
        task_id: TaskId::new(message.int32(MessageKey::TaskId)?),
        title: message.text(MessageKey::Title)?,
        notes: message.optional_text(MessageKey::Notes),
        done: message.flag(MessageKey::IsDone)?,
    })
}
