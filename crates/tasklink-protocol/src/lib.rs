//! # tasklink-protocol: watch/companion wire contract
//!
//! Shared types for the channel between the watch client and the companion
//! process that fetches task lists on its behalf. The crate is runtime-free:
//! it only describes what travels over the channel and the ports the host
//! environment must provide.
//!
//! ## Module Overview
//!
//! - [`keys`]: Field keys, opcodes, and scopes with their wire values
//! - [`message`]: `Dictionary`, the structured key/value payload
//! - [`ids`]: Typed list and task identifiers
//! - [`codec`]: Request encoding and defensive inbound decoding
//! - [`ports`]: Transport and consumer traits implemented by the host
//! - [`error`]: ProtocolError, TransportError, CommError

pub mod codec;
pub mod error;
pub mod ids;
pub mod keys;
pub mod message;
pub mod ports;

// Re-export the most commonly used types at the crate root.
pub use codec::{
    ArrayStart, Header, ListItem, Request, TaskItem, decode_array_start, decode_header,
    decode_list_item, decode_task_item,
};
pub use error::{CommError, CommResult, ProtocolError, ProtocolResult, TransportError};
pub use ids::{ListId, TaskId};
pub use keys::{MessageKey, Opcode, Scope};
pub use message::{Dictionary, Value};
pub use ports::{ListsConsumer, StatusLine, TasksConsumer, Transport};
