//! Field keys, opcodes, and scopes.
//!
//! Every field has a name, used in JSON transcripts, and an application key,
//! the integer the host transport writes on the wire. Opcodes and scopes are
//! plain integers on the wire; values this layer does not know decode to
//! `None` rather than failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A field of the structured payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKey {
    Code,
    Scope,
    Error,
    Count,
    Item,
    ListId,
    TaskId,
    Title,
    Size,
    Notes,
    IsDone,
}

impl MessageKey {
    pub const ALL: [MessageKey; 11] = [
        MessageKey::Code,
        MessageKey::Scope,
        MessageKey::Error,
        MessageKey::Count,
        MessageKey::Item,
        MessageKey::ListId,
        MessageKey::TaskId,
        MessageKey::Title,
        MessageKey::Size,
        MessageKey::Notes,
        MessageKey::IsDone,
    ];

    /// Name used in dictionaries and transcripts.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::Code => "code",
            MessageKey::Scope => "scope",
            MessageKey::Error => "error",
            MessageKey::Count => "count",
            MessageKey::Item => "item",
            MessageKey::ListId => "listId",
            MessageKey::TaskId => "taskId",
            MessageKey::Title => "title",
            MessageKey::Size => "size",
            MessageKey::Notes => "notes",
            MessageKey::IsDone => "isDone",
        }
    }

    /// Integer application key written by the host transport.
    pub fn app_key(self) -> u32 {
        match self {
            MessageKey::Code => 0,
            MessageKey::Scope => 1,
            MessageKey::Error => 2,
            MessageKey::Count => 3,
            MessageKey::Item => 4,
            MessageKey::ListId => 5,
            MessageKey::TaskId => 6,
            MessageKey::Title => 7,
            MessageKey::Size => 8,
            MessageKey::Notes => 9,
            MessageKey::IsDone => 10,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message semantics selector carried in the `code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opcode {
    /// Client request for a collection.
    Get,
    /// Companion-side failure report; carries optional `error` text.
    Error,
    /// Readiness handshake from the companion.
    Ready,
    ArrayStart,
    ArrayItem,
    ArrayEnd,
}

impl Opcode {
    pub fn wire(self) -> i64 {
        match self {
            Opcode::Get => 0,
            Opcode::Error => 1,
            Opcode::Ready => 2,
            Opcode::ArrayStart => 3,
            Opcode::ArrayItem => 4,
            Opcode::ArrayEnd => 5,
        }
    }

    pub fn from_wire(code: i64) -> Option<Self> {
        match code {
            0 => Some(Opcode::Get),
            1 => Some(Opcode::Error),
            2 => Some(Opcode::Ready),
            3 => Some(Opcode::ArrayStart),
            4 => Some(Opcode::ArrayItem),
            5 => Some(Opcode::ArrayEnd),
            _ => None,
        }
    }

    /// Control opcodes are handled without a scope.
    pub fn is_control(self) -> bool {
        matches!(self, Opcode::Error | Opcode::Ready)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Get => "get",
            Opcode::Error => "error",
            Opcode::Ready => "ready",
            Opcode::ArrayStart => "array_start",
            Opcode::ArrayItem => "array_item",
            Opcode::ArrayEnd => "array_end",
        };
        f.write_str(name)
    }
}

/// Which consumer a data-bearing message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The collection of task lists.
    Lists,
    /// The tasks within one list.
    Tasks,
}

impl Scope {
    pub fn wire(self) -> i64 {
        match self {
            Scope::Lists => 0,
            Scope::Tasks => 1,
        }
    }

    pub fn from_wire(scope: i64) -> Option<Self> {
        match scope {
            0 => Some(Scope::Lists),
            1 => Some(Scope::Tasks),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Lists => f.write_str("lists"),
            Scope::Tasks => f.write_str("tasks"),
        }
    }
}
