//! Routing of data-bearing inbound messages to their scope consumer.

use tasklink_protocol::{
    Dictionary, MessageKey, Opcode, ProtocolError, ProtocolResult, Scope, StatusLine,
    TransportError, decode_array_start, decode_list_item, decode_task_item,
};
use tracing::{debug, warn};

use crate::config::CommConfig;
use crate::registry::ConsumerRegistry;

/// What handling one inbound message amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A companion Error message was shown on the status line.
    ErrorReported(String),
    Ready(ReadyReport),
    /// The scope's screen is not shown; the message was dropped unread.
    Stale { scope: Scope },
    CountSet { scope: Scope, count: usize },
    ItemStored { scope: Scope, index: usize },
    TransferFinished { scope: Scope },
    Ignored(Ignored),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    UnknownScope(i64),
    UnexpectedOpcode { scope: Scope, code: i64 },
}

/// Effects of a Ready message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadyReport {
    /// `false` for a repeated Ready, which has no effect.
    pub first: bool,
    /// A deferred request was transmitted.
    pub flushed: bool,
    pub flush_error: Option<TransportError>,
    pub callback_fired: bool,
}

pub(crate) fn route_scoped<S: StatusLine>(
    code: i64,
    raw_scope: i64,
    message: &Dictionary,
    consumers: &mut ConsumerRegistry<'_>,
    status: &mut S,
    config: &CommConfig,
) -> ProtocolResult<Dispatch> {
    let Some(scope) = Scope::from_wire(raw_scope) else {
        warn!(scope = raw_scope, "unexpected scope");
        return Ok(Dispatch::Ignored(Ignored::UnknownScope(raw_scope)));
    };
    debug!(%scope, code, "scoped message");

    if !consumers.is_active(scope) {
        debug!(%scope, "ignoring message for inactive scope");
        return Ok(Dispatch::Stale { scope });
    }

    match Opcode::from_wire(code) {
        Some(Opcode::ArrayStart) => {
            let start = decode_array_start(message, scope)?;
            if start.count > config.max_array_count {
                return Err(ProtocolError::OutOfRange {
                    key: MessageKey::Count,
                    value: i64::try_from(start.count).unwrap_or(i64::MAX),
                });
            }
            debug!(%scope, count = start.count, "items count");
            match scope {
                Scope::Lists => consumers.lists.set_count(start.count),
                Scope::Tasks => {
                    let current = consumers.tasks.current_list_id();
                    if start.list_id != current {
                        warn!(
                            list_id = ?start.list_id,
                            current = ?current,
                            "task transfer for a list other than the open one"
                        );
                        status.show(&config.list_mismatch_text);
                    }
                    consumers.tasks.set_count(start.count);
                }
            }
            Ok(Dispatch::CountSet {
                scope,
                count: start.count,
            })
        }
        Some(Opcode::ArrayItem) => {
            let index = match scope {
                Scope::Lists => {
                    let item = decode_list_item(message)?;
                    debug!(index = item.index, list_id = %item.list_id, size = item.size, "list item");
                    let index = item.index;
                    consumers.lists.set_item(item);
                    index
                }
                Scope::Tasks => {
                    let item = decode_task_item(message)?;
                    debug!(index = item.index, task_id = %item.task_id, done = item.done, "task item");
                    let index = item.index;
                    consumers.tasks.set_item(item);
                    index
                }
            };
            Ok(Dispatch::ItemStored { scope, index })
        }
        Some(Opcode::ArrayEnd) => {
            debug!(%scope, "transfer finished");
            status.hide();
            Ok(Dispatch::TransferFinished { scope })
        }
        _ => {
            warn!(%scope, code, "unexpected message code");
            Ok(Dispatch::Ignored(Ignored::UnexpectedOpcode { scope, code }))
        }
    }
}
