//! The client event loop: one `Comm`, the screens, and the host's events.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tasklink_protocol::{ListId, Scope, TransportError};
use tasklink_runtime::{Comm, CommConfig, ConsumerRegistry, Dispatch, Readiness};
use tasklink_screens::{ListsScreen, StatusBar, Task, TaskList, TasksScreen};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::companion::{Companion, TaskSource};
use crate::host::{ChannelTransport, HostEvent};

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    /// Delay before the companion announces itself.
    pub startup: Duration,
    /// Delay before each reply.
    pub latency: Duration,
    /// Listing requests issued before the handshake. Zero means the listing
    /// is requested from the readiness callback instead.
    pub early_triggers: usize,
    /// List to open once the lists are in; defaults to the first one.
    pub list_id: Option<ListId>,
    /// Longest wait for a single host event.
    pub deadline: Duration,
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            startup: Duration::from_millis(200),
            latency: Duration::from_millis(50),
            early_triggers: 1,
            list_id: None,
            deadline: Duration::from_secs(5),
        }
    }
}

/// What the screens ended up showing.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub readiness: Readiness,
    pub messages: usize,
    pub malformed: usize,
    pub transmitted: usize,
    pub lists: Vec<TaskList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_title: Option<String>,
    pub tasks: Vec<Task>,
    pub status: Vec<String>,
}

impl Summary {
    pub(crate) fn collect(
        readiness: Readiness,
        lists: &ListsScreen,
        tasks: &TasksScreen,
        status: &StatusBar,
    ) -> Self {
        Self {
            readiness,
            messages: 0,
            malformed: 0,
            transmitted: 0,
            lists: lists.lists().cloned().collect(),
            list_title: tasks.list_title().map(str::to_owned),
            tasks: tasks.tasks().cloned().collect(),
            status: status.history().to_vec(),
        }
    }
}

/// Browses the companion's lists, then the tasks of one list.
pub async fn simulate<S>(config: CommConfig, source: S, options: SimulateOptions) -> Result<Summary>
where
    S: TaskSource + 'static,
{
    let (wire_tx, wire_rx) = mpsc::channel(4);
    let (event_tx, mut events) = mpsc::channel(64);
    let companion = tokio::spawn(Companion::new(source, options.latency).run(
        options.startup,
        wire_rx,
        event_tx,
    ));

    let inbox_size = config.inbox_size;
    let mut comm = Comm::new(config, ChannelTransport::new(wire_tx), StatusBar::new());
    comm.open().context("opening the channel")?;

    let mut lists = ListsScreen::new();
    let mut tasks = TasksScreen::new();
    lists.show();

    if options.early_triggers == 0 {
        comm.on_ready(|comm| {
            if let Err(error) = comm.request_listing() {
                warn!(%error, "listing request failed");
            }
        });
    }
    for _ in 0..options.early_triggers {
        let status = comm.request_listing()?;
        info!(?status, "early listing request");
    }

    let mut messages = 0;
    let mut malformed = 0;
    loop {
        let event = tokio::time::timeout(options.deadline, events.recv())
            .await
            .context("timed out waiting for the companion")?;
        let message = match event {
            None => bail!("companion hung up"),
            Some(HostEvent::Sent) => {
                comm.on_sent();
                continue;
            }
            Some(HostEvent::SendFailed(reason)) => {
                comm.on_send_failed(reason);
                continue;
            }
            Some(HostEvent::Inbound(message)) => message,
        };
        if message.packed_size() > inbox_size {
            comm.on_inbox_dropped(TransportError::BufferOverflow);
            continue;
        }

        messages += 1;
        let mut consumers = ConsumerRegistry::new(&mut lists, &mut tasks);
        match comm.handle_inbound(&message, &mut consumers) {
            Ok(Dispatch::TransferFinished {
                scope: Scope::Lists,
            }) => {
                let chosen = match options.list_id {
                    Some(list_id) => lists.lists().find(|list| list.id == list_id).cloned(),
                    None => lists.get(0).cloned(),
                };
                let (list_id, title) = match (chosen, options.list_id) {
                    (Some(list), _) => (list.id, list.title),
                    (None, Some(list_id)) => (list_id, format!("List {list_id}")),
                    (None, None) => {
                        info!("companion has no lists");
                        break;
                    }
                };
                info!(%list_id, title = %title, "opening list");
                tasks.show(list_id, title);
                comm.request_tasks(list_id)?;
            }
            Ok(Dispatch::TransferFinished {
                scope: Scope::Tasks,
            }) => break,
            Ok(Dispatch::ErrorReported(_)) => break,
            Ok(_) => {}
            Err(_) => malformed += 1,
        }
    }

    let mut summary = Summary::collect(comm.readiness(), &lists, &tasks, comm.status());
    summary.messages = messages;
    summary.malformed = malformed;
    summary.transmitted = comm.transport().transmitted();

    drop(comm);
    drop(events);
    companion.await.context("companion task")?;
    Ok(summary)
}
