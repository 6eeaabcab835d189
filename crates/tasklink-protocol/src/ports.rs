//! Host boundary ports for the tasklink channel.
//!
//! The host environment supplies the transport that marshals dictionaries
//! onto the wire, and the UI supplies one consumer per scope plus a status
//! line for user-visible diagnostics. Everything runs on the host's single
//! event thread, so the traits take `&mut self` and need no `Send`.

use crate::codec::{ListItem, TaskItem};
use crate::error::TransportError;
use crate::ids::ListId;
use crate::message::Dictionary;

/// Outbound half of the host transport.
///
/// The outbox holds exactly one message. `stage` replaces its contents and
/// `transmit` sends whatever is staged; delivery verdicts arrive later as
/// separate notifications.
pub trait Transport {
    fn open(&mut self, inbox_size: usize, outbox_size: usize) -> Result<(), TransportError>;
    fn close(&mut self);
    fn stage(&mut self, message: Dictionary) -> Result<(), TransportError>;
    fn transmit(&mut self) -> Result<(), TransportError>;
}

/// Consumer of `Scope::Lists` transfers.
pub trait ListsConsumer {
    /// Whether the owning screen is currently shown.
    fn is_active(&self) -> bool;
    fn set_count(&mut self, count: usize);
    fn set_item(&mut self, item: ListItem<'_>);
}

/// Consumer of `Scope::Tasks` transfers.
pub trait TasksConsumer {
    /// Whether the owning screen is currently shown.
    fn is_active(&self) -> bool;
    /// List whose tasks the screen displays.
    fn current_list_id(&self) -> Option<ListId>;
    fn set_count(&mut self, count: usize);
    fn set_item(&mut self, item: TaskItem<'_>);
}

/// User-visible one-line status area.
pub trait StatusLine {
    fn show(&mut self, text: &str);
    /// Dismisses the current text; also the loading-finished notification.
    fn hide(&mut self);
}
