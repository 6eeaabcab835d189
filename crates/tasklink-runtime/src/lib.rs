//! # tasklink-runtime: the client side of the companion channel
//!
//! [`Comm`] owns the protocol state: the readiness gate, the depth-one
//! outbound slot, and the one-shot readiness callback. Query triggers and
//! inbound dispatch both go through it, on the host's single event thread.
//! `&mut self` on every state-changing call is what keeps "at most one
//! deferred request" true; a host that spreads these calls across threads
//! must wrap the `Comm` in a mutex.

mod config;
mod dispatch;
mod gate;
mod outbound;
mod registry;

#[cfg(test)]
mod test_support;

pub use config::{CommConfig, DEFAULT_INBOX_SIZE, DEFAULT_MAX_ARRAY_COUNT, DEFAULT_OUTBOX_SIZE};
pub use dispatch::{Dispatch, Ignored, ReadyReport};
pub use gate::{Readiness, ReadinessGate};
pub use outbound::OutboundQueue;
pub use registry::ConsumerRegistry;

use tasklink_protocol::{
    CommResult, Dictionary, Header, ListId, ProtocolError, ProtocolResult, Request, StatusLine,
    TaskId, Transport, TransportError, decode_header,
};
use tracing::{debug, error, info, instrument, warn};

/// Result of a query trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// Transmitted now.
    Sent,
    /// Staged; goes out when the companion announces itself.
    Deferred,
    /// A deferred request already occupies the slot; this one was dropped.
    AlreadyPending,
}

/// One-shot readiness callback. Its captures are its context.
pub type ReadyCallback<T, S> = Box<dyn FnOnce(&mut Comm<T, S>)>;

pub struct Comm<T: Transport, S: StatusLine> {
    config: CommConfig,
    transport: T,
    status: S,
    gate: ReadinessGate,
    outbound: OutboundQueue,
    ready_callback: Option<ReadyCallback<T, S>>,
}

impl<T: Transport, S: StatusLine> Comm<T, S> {
    pub fn new(config: CommConfig, transport: T, status: S) -> Self {
        Self {
            config,
            transport,
            status,
            gate: ReadinessGate::new(),
            outbound: OutboundQueue::new(),
            ready_callback: None,
        }
    }

    /// Registers with the host transport using the configured buffer sizes.
    pub fn open(&mut self) -> CommResult<()> {
        self.transport
            .open(self.config.inbox_size, self.config.outbox_size)?;
        debug!(
            inbox_size = self.config.inbox_size,
            outbox_size = self.config.outbox_size,
            "channel opened"
        );
        Ok(())
    }

    /// Deregisters from the host transport. An unfired readiness callback is dropped.
    pub fn close(&mut self) {
        self.transport.close();
        self.ready_callback = None;
        debug!("channel closed");
    }

    pub fn config(&self) -> &CommConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut S {
        &mut self.status
    }

    pub fn readiness(&self) -> Readiness {
        self.gate.state()
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// A request is deferred until the handshake. UIs disable triggers while set.
    pub fn is_busy(&self) -> bool {
        self.outbound.is_busy()
    }

    /// A transmitted request has not yet been confirmed or failed by the host.
    pub fn is_in_flight(&self) -> bool {
        self.outbound.is_in_flight()
    }

    /// Registers the one-shot readiness callback, replacing an unfired one.
    /// Runs it at once if the companion is already ready.
    pub fn on_ready(&mut self, callback: impl FnOnce(&mut Self) + 'static) {
        if self.gate.is_ready() {
            debug!("already ready, running callback now");
            callback(self);
            return;
        }
        self.ready_callback = Some(Box::new(callback));
    }

    #[instrument(skip(self))]
    pub fn request_listing(&mut self) -> CommResult<SendStatus> {
        debug!("querying task lists");
        self.send(Request::listing())
    }

    #[instrument(skip(self), fields(list_id = %list_id))]
    pub fn request_tasks(&mut self, list_id: ListId) -> CommResult<SendStatus> {
        debug!("querying tasks");
        self.send(Request::tasks(list_id))
    }

    #[instrument(skip(self), fields(list_id = %list_id, task_id = %task_id))]
    pub fn request_task_details(
        &mut self,
        list_id: ListId,
        task_id: TaskId,
    ) -> CommResult<SendStatus> {
        debug!("querying task details");
        self.send(Request::task_details(list_id, task_id))
    }

    /// Sends now when ready, otherwise defers into the single slot.
    ///
    /// A second request while one is deferred is rejected before staging,
    /// so the outbox keeps the first request intact.
    pub fn send(&mut self, request: Request) -> CommResult<SendStatus> {
        if !self.gate.is_ready() && self.outbound.is_busy() {
            error!(
                scope = %request.scope,
                "tried to send while a deferred request is already waiting"
            );
            self.status.show(&self.config.already_pending_text);
            return Ok(SendStatus::AlreadyPending);
        }

        let message = request.encode();
        let size = message.packed_size();
        if size > self.config.outbox_size {
            return Err(ProtocolError::Oversized {
                size,
                limit: self.config.outbox_size,
            }
            .into());
        }
        self.transport.stage(message)?;

        if self.gate.is_ready() {
            debug!("companion ready, sending");
            self.transport.transmit()?;
            self.outbound.mark_in_flight();
            Ok(SendStatus::Sent)
        } else {
            debug!("companion not ready, deferring");
            let deferred = self.outbound.defer();
            debug_assert!(deferred, "slot checked free above");
            Ok(SendStatus::Deferred)
        }
    }

    /// Handles one inbound message. A malformed message is reported on the
    /// status line and returned as an error; the channel stays usable.
    #[instrument(skip_all, fields(entries = message.len()))]
    pub fn handle_inbound(
        &mut self,
        message: &Dictionary,
        consumers: &mut ConsumerRegistry<'_>,
    ) -> ProtocolResult<Dispatch> {
        let result = self.route(message, consumers);
        if let Err(error) = &result {
            warn!(%error, "dropping malformed message");
            let notice = format!("{}{error}", self.config.bad_message_prefix);
            self.status.show(&notice);
        }
        result
    }

    fn route(
        &mut self,
        message: &Dictionary,
        consumers: &mut ConsumerRegistry<'_>,
    ) -> ProtocolResult<Dispatch> {
        match decode_header(message)? {
            Header::Error { message: text } => {
                let text = text
                    .unwrap_or(self.config.unknown_error_text.as_str())
                    .to_owned();
                info!(error = %text, "companion reported an error");
                self.status.show(&text);
                Ok(Dispatch::ErrorReported(text))
            }
            Header::Ready => Ok(Dispatch::Ready(self.handle_ready())),
            Header::Scoped { code, scope } => dispatch::route_scoped(
                code,
                scope,
                message,
                consumers,
                &mut self.status,
                &self.config,
            ),
        }
    }

    fn handle_ready(&mut self) -> ReadyReport {
        if !self.gate.open() {
            debug!("repeated ready ignored");
            return ReadyReport::default();
        }
        info!("companion ready");

        let mut report = ReadyReport {
            first: true,
            ..ReadyReport::default()
        };

        if self.outbound.is_busy() {
            debug!("have deferred request, sending");
            let sent = self.transport.transmit();
            let had_pending = self.outbound.take_pending();
            debug_assert!(had_pending);
            match sent {
                Ok(()) => {
                    self.outbound.mark_in_flight();
                    report.flushed = true;
                }
                Err(error) => {
                    error!(%error, "deferred request failed to transmit");
                    self.status.show(&self.config.send_failed_text);
                    report.flush_error = Some(error);
                }
            }
        }

        if let Some(callback) = self.ready_callback.take() {
            debug!("running readiness callback");
            callback(self);
            report.callback_fired = true;
        }
        report
    }

    /// Host notification: the last transmitted message was delivered.
    pub fn on_sent(&mut self) {
        let was_in_flight = self.outbound.settle();
        debug!(was_in_flight, "message sent");
    }

    /// Host notification: the last transmitted message was not delivered.
    /// Not retried and not shown to the user.
    pub fn on_send_failed(&mut self, reason: TransportError) {
        let was_in_flight = self.outbound.settle();
        warn!(%reason, was_in_flight, "message send failed");
    }

    /// Host notification: an inbound message was dropped before reaching us.
    pub fn on_inbox_dropped(&mut self, reason: TransportError) {
        warn!(%reason, "inbound message dropped");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use tasklink_protocol::{CommError, MessageKey, Opcode, Scope};

    use super::*;
    use crate::test_support::{
        RecordingLists, RecordingStatus, RecordingTasks, RecordingTransport, array_end,
        array_start, list_item, ready, task_item,
    };

    type TestComm = Comm<RecordingTransport, RecordingStatus>;

    fn comm() -> TestComm {
        let mut comm = Comm::new(
            CommConfig::default(),
            RecordingTransport::default(),
            RecordingStatus::default(),
        );
        comm.open().unwrap();
        comm
    }

    fn deliver(
        comm: &mut TestComm,
        lists: &mut RecordingLists,
        tasks: &mut RecordingTasks,
        message: &Dictionary,
    ) -> ProtocolResult<Dispatch> {
        let mut consumers = ConsumerRegistry::new(lists, tasks);
        comm.handle_inbound(message, &mut consumers)
    }

    #[test]
    fn open_and_close_reach_the_transport() {
        let mut comm = comm();
        assert_eq!(
            comm.transport().opened,
            Some((DEFAULT_INBOX_SIZE, DEFAULT_OUTBOX_SIZE))
        );
        comm.close();
        assert!(comm.transport().closed);
    }

    #[test]
    fn only_one_request_defers_before_ready() {
        let mut comm = comm();
        assert_eq!(comm.request_listing(), Ok(SendStatus::Deferred));
        assert!(comm.is_busy());
        for list in 0..5 {
            assert_eq!(
                comm.request_tasks(ListId::new(list)),
                Ok(SendStatus::AlreadyPending)
            );
        }
        assert_eq!(comm.request_listing(), Ok(SendStatus::AlreadyPending));
        assert!(comm.transport().transmitted.is_empty());
        assert_eq!(
            comm.status().shown,
            vec!["Internal error: already sending msg"; 6]
        );
    }

    #[test]
    fn rejected_request_does_not_overwrite_the_outbox() {
        let mut comm = comm();
        comm.request_listing().unwrap();
        comm.request_tasks(ListId::new(3)).unwrap();
        assert_eq!(comm.transport().staged, Some(Request::listing().encode()));
        assert_eq!(comm.transport().stage_calls, 1);
    }

    #[test]
    fn ready_flushes_the_deferred_request_once() {
        let mut comm = comm();
        let (mut lists, mut tasks) = (RecordingLists::default(), RecordingTasks::default());

        assert_eq!(comm.request_listing(), Ok(SendStatus::Deferred));
        assert!(comm.is_busy());

        let dispatch = deliver(&mut comm, &mut lists, &mut tasks, &ready()).unwrap();
        assert_eq!(
            dispatch,
            Dispatch::Ready(ReadyReport {
                first: true,
                flushed: true,
                flush_error: None,
                callback_fired: false,
            })
        );
        assert!(!comm.is_busy());
        assert!(comm.is_in_flight());
        assert_eq!(comm.transport().transmitted, vec![Request::listing().encode()]);

        let dispatch = deliver(&mut comm, &mut lists, &mut tasks, &ready()).unwrap();
        assert_eq!(dispatch, Dispatch::Ready(ReadyReport::default()));
        assert_eq!(comm.transport().transmitted.len(), 1);
    }

    #[test]
    fn ready_callback_fires_exactly_once() {
        let mut comm = comm();
        let (mut lists, mut tasks) = (RecordingLists::default(), RecordingTasks::default());
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        comm.on_ready(move |comm| {
            counter.set(counter.get() + 1);
            comm.request_listing().unwrap();
        });

        deliver(&mut comm, &mut lists, &mut tasks, &ready()).unwrap();
        deliver(&mut comm, &mut lists, &mut tasks, &ready()).unwrap();

        assert_eq!(fired.get(), 1);
        assert_eq!(comm.transport().transmitted, vec![Request::listing().encode()]);
    }

    #[test]
    fn callback_registered_after_ready_runs_immediately() {
        let mut comm = comm();
        let (mut lists, mut tasks) = (RecordingLists::default(), RecordingTasks::default());
        deliver(&mut comm, &mut lists, &mut tasks, &ready()).unwrap();

        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        comm.on_ready(move |_| flag.set(true));
        assert!(fired.get());
    }

    #[test]
    fn sends_immediately_once_ready() {
        let mut comm = comm();
        let (mut lists, mut tasks) = (RecordingLists::default(), RecordingTasks::default());
        deliver(&mut comm, &mut lists, &mut tasks, &ready()).unwrap();

        assert_eq!(comm.request_tasks(ListId::new(7)), Ok(SendStatus::Sent));
        assert!(!comm.is_busy());
        assert!(comm.is_in_flight());
        comm.on_sent();
        assert!(!comm.is_in_flight());

        assert_eq!(
            comm.request_task_details(ListId::new(7), TaskId::new(101)),
            Ok(SendStatus::Sent)
        );
        comm.on_send_failed(TransportError::Timeout);
        assert!(!comm.is_in_flight());
        assert_eq!(comm.transport().transmitted.len(), 2);
    }

    #[test]
    fn flush_failure_clears_pending_and_is_reported() {
        let mut comm = comm();
        let (mut lists, mut tasks) = (RecordingLists::default(), RecordingTasks::default());
        comm.request_listing().unwrap();
        comm.transport_mut().fail_next = Some(TransportError::NotConnected);

        let dispatch = deliver(&mut comm, &mut lists, &mut tasks, &ready()).unwrap();
        let Dispatch::Ready(report) = dispatch else {
            panic!("expected ready dispatch, got {dispatch:?}");
        };
        assert!(report.first);
        assert!(!report.flushed);
        assert_eq!(report.flush_error, Some(TransportError::NotConnected));
        assert!(!comm.is_busy());
        assert!(!comm.is_in_flight());
        assert_eq!(comm.status().shown, vec!["Failed to send request"]);
    }

    #[test]
    fn transmit_failure_when_ready_is_returned() {
        let mut comm = comm();
        let (mut lists, mut tasks) = (RecordingLists::default(), RecordingTasks::default());
        deliver(&mut comm, &mut lists, &mut tasks, &ready()).unwrap();
        comm.transport_mut().fail_next = Some(TransportError::Busy);

        assert_eq!(
            comm.request_listing(),
            Err(CommError::Transport(TransportError::Busy))
        );
        assert!(!comm.is_in_flight());
    }

    #[test]
    fn oversized_requests_never_reach_the_transport() {
        let mut comm = Comm::new(
            CommConfig::default().with_buffer_sizes(DEFAULT_INBOX_SIZE, 8),
            RecordingTransport::default(),
            RecordingStatus::default(),
        );
        let result = comm.request_listing();
        assert!(matches!(
            result,
            Err(CommError::Protocol(ProtocolError::Oversized { limit: 8, .. }))
        ));
        assert_eq!(comm.transport().stage_calls, 0);
        assert!(!comm.is_busy());
    }

    #[test]
    fn full_task_transfer_reaches_an_active_consumer() {
        let mut comm = comm();
        let mut lists = RecordingLists::default();
        let mut tasks = RecordingTasks::showing(ListId::new(7));

        let messages = [
            array_start(Scope::Tasks, 2).with(MessageKey::ListId, 7),
            task_item(0, 101, "A", false),
            task_item(1, 102, "B", true),
            array_end(Scope::Tasks),
        ];
        let dispatched: Vec<Dispatch> = messages
            .iter()
            .map(|message| deliver(&mut comm, &mut lists, &mut tasks, message).unwrap())
            .collect();

        assert_eq!(
            dispatched,
            vec![
                Dispatch::CountSet {
                    scope: Scope::Tasks,
                    count: 2
                },
                Dispatch::ItemStored {
                    scope: Scope::Tasks,
                    index: 0
                },
                Dispatch::ItemStored {
                    scope: Scope::Tasks,
                    index: 1
                },
                Dispatch::TransferFinished {
                    scope: Scope::Tasks
                },
            ]
        );
        assert_eq!(tasks.count, Some(2));
        assert_eq!(tasks.items.len(), 2);
        assert!(!tasks.items[0].done);
        assert!(tasks.items[1].done);
        assert_eq!(tasks.items[1].title, "B");
        assert_eq!(comm.status().hides, 1);
        assert!(comm.status().shown.is_empty());
    }

    #[test]
    fn list_transfer_produces_count_items_and_one_finish() {
        let mut comm = comm();
        let mut lists = RecordingLists::active();
        let mut tasks = RecordingTasks::default();
        let count = 4;

        deliver(&mut comm, &mut lists, &mut tasks, &array_start(Scope::Lists, count)).unwrap();
        for index in 0..count {
            let message = list_item(index, 10 + index as i32, "List", 3);
            deliver(&mut comm, &mut lists, &mut tasks, &message).unwrap();
        }
        deliver(&mut comm, &mut lists, &mut tasks, &array_end(Scope::Lists)).unwrap();

        assert_eq!(lists.count, Some(count));
        assert_eq!(lists.items.len(), count);
        let indices: Vec<usize> = lists.items.iter().map(|item| item.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(comm.status().hides, 1);
    }

    #[test]
    fn inactive_scopes_see_no_side_effects() {
        let mut comm = comm();
        let mut lists = RecordingLists::default();
        let mut tasks = RecordingTasks::default();

        let messages = [
            array_start(Scope::Lists, 1),
            list_item(0, 1, "Inbox", 2),
            array_end(Scope::Lists),
            array_start(Scope::Tasks, 1).with(MessageKey::ListId, 1),
            task_item(0, 5, "Stale", false),
            array_end(Scope::Tasks),
            // Malformed, but the scope is checked first.
            Dictionary::new()
                .with(MessageKey::Code, Opcode::ArrayItem.wire())
                .with(MessageKey::Scope, Scope::Tasks.wire()),
        ];
        for message in &messages {
            let dispatch = deliver(&mut comm, &mut lists, &mut tasks, message).unwrap();
            assert!(matches!(dispatch, Dispatch::Stale { .. }));
        }

        assert_eq!(lists.count, None);
        assert!(lists.items.is_empty());
        assert_eq!(tasks.count, None);
        assert!(tasks.items.is_empty());
        assert_eq!(comm.status().hides, 0);
        assert!(comm.status().shown.is_empty());
    }

    #[test]
    fn error_without_text_shows_the_default() {
        let mut comm = comm();
        let (mut lists, mut tasks) = (RecordingLists::default(), RecordingTasks::default());
        let message = Dictionary::new().with(MessageKey::Code, Opcode::Error.wire());

        let dispatch = deliver(&mut comm, &mut lists, &mut tasks, &message).unwrap();
        assert_eq!(dispatch, Dispatch::ErrorReported("Unknown error".to_owned()));
        assert_eq!(comm.status().shown, vec!["Unknown error"]);

        let message = message.with(MessageKey::Error, "Not signed in");
        deliver(&mut comm, &mut lists, &mut tasks, &message).unwrap();
        assert_eq!(comm.status().shown.last().map(String::as_str), Some("Not signed in"));
    }

    #[test]
    fn list_id_mismatch_warns_but_continues() {
        let mut comm = comm();
        let mut lists = RecordingLists::default();
        let mut tasks = RecordingTasks::showing(ListId::new(7));

        let message = array_start(Scope::Tasks, 3).with(MessageKey::ListId, 8);
        let dispatch = deliver(&mut comm, &mut lists, &mut tasks, &message).unwrap();

        assert_eq!(
            dispatch,
            Dispatch::CountSet {
                scope: Scope::Tasks,
                count: 3
            }
        );
        assert_eq!(tasks.count, Some(3));
        assert_eq!(comm.status().shown, vec!["Warning: list ID mismatch"]);
    }

    #[test]
    fn malformed_messages_fail_alone() {
        let mut comm = comm();
        let mut lists = RecordingLists::active();
        let mut tasks = RecordingTasks::default();

        let no_code = Dictionary::new().with(MessageKey::Scope, Scope::Lists.wire());
        assert_eq!(
            deliver(&mut comm, &mut lists, &mut tasks, &no_code),
            Err(ProtocolError::MissingField(MessageKey::Code))
        );

        let no_scope = Dictionary::new().with(MessageKey::Code, Opcode::ArrayEnd.wire());
        assert_eq!(
            deliver(&mut comm, &mut lists, &mut tasks, &no_scope),
            Err(ProtocolError::MissingField(MessageKey::Scope))
        );

        let mut no_title = list_item(0, 1, "x", 1);
        no_title.insert(MessageKey::Title, 12);
        assert!(matches!(
            deliver(&mut comm, &mut lists, &mut tasks, &no_title),
            Err(ProtocolError::InvalidType {
                key: MessageKey::Title,
                ..
            })
        ));
        assert!(lists.items.is_empty());
        assert_eq!(comm.status().shown.len(), 3);
        assert_eq!(
            comm.status().shown[0],
            "Bad message: missing field: code"
        );

        // The channel keeps serving.
        let ok = list_item(0, 1, "Inbox", 1);
        assert!(deliver(&mut comm, &mut lists, &mut tasks, &ok).is_ok());
        assert_eq!(lists.items.len(), 1);
    }

    #[test]
    fn oversized_counts_are_refused_before_reaching_consumers() {
        let mut comm = Comm::new(
            CommConfig::default().with_max_array_count(8),
            RecordingTransport::default(),
            RecordingStatus::default(),
        );
        let mut lists = RecordingLists::active();
        let mut tasks = RecordingTasks::showing(ListId::new(7));

        let huge = array_start(Scope::Lists, 0).with(MessageKey::Count, i64::MAX);
        assert_eq!(
            deliver(&mut comm, &mut lists, &mut tasks, &huge),
            Err(ProtocolError::OutOfRange {
                key: MessageKey::Count,
                value: i64::MAX
            })
        );

        let above_limit = array_start(Scope::Tasks, 9).with(MessageKey::ListId, 3);
        assert_eq!(
            deliver(&mut comm, &mut lists, &mut tasks, &above_limit),
            Err(ProtocolError::OutOfRange {
                key: MessageKey::Count,
                value: 9
            })
        );

        assert_eq!(lists.count, None);
        assert_eq!(tasks.count, None);
        assert_eq!(comm.status().shown.len(), 2);
        assert!(
            comm.status()
                .shown
                .iter()
                .all(|text| text.starts_with("Bad message: "))
        );

        let within_limit = array_start(Scope::Lists, 8);
        assert!(deliver(&mut comm, &mut lists, &mut tasks, &within_limit).is_ok());
        assert_eq!(lists.count, Some(8));
    }

    #[test]
    fn unknown_scope_and_opcode_are_ignored() {
        let mut comm = comm();
        let mut lists = RecordingLists::active();
        let mut tasks = RecordingTasks::default();

        let unknown_scope = Dictionary::new()
            .with(MessageKey::Code, Opcode::ArrayEnd.wire())
            .with(MessageKey::Scope, 7);
        assert_eq!(
            deliver(&mut comm, &mut lists, &mut tasks, &unknown_scope),
            Ok(Dispatch::Ignored(Ignored::UnknownScope(7)))
        );

        let get_inbound = Request::listing().encode();
        assert_eq!(
            deliver(&mut comm, &mut lists, &mut tasks, &get_inbound),
            Ok(Dispatch::Ignored(Ignored::UnexpectedOpcode {
                scope: Scope::Lists,
                code: Opcode::Get.wire()
            }))
        );

        let unknown_code = Dictionary::new()
            .with(MessageKey::Code, 42)
            .with(MessageKey::Scope, Scope::Lists.wire());
        assert!(matches!(
            deliver(&mut comm, &mut lists, &mut tasks, &unknown_code),
            Ok(Dispatch::Ignored(Ignored::UnexpectedOpcode { code: 42, .. }))
        ));
        assert_eq!(comm.status().hides, 0);
        assert!(comm.status().shown.is_empty());
    }

    #[test]
    fn delivery_notifications_leave_pending_alone() {
        let mut comm = comm();
        comm.request_listing().unwrap();
        comm.on_sent();
        comm.on_send_failed(TransportError::Rejected);
        comm.on_inbox_dropped(TransportError::BufferOverflow);
        assert!(comm.is_busy());
        assert_eq!(comm.readiness(), Readiness::NotReady);
    }
}
