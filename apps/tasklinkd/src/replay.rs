//! Feeds a recorded transcript of inbound messages through the dispatcher.
//!
//! A transcript holds one JSON dictionary per line, e.g.
//! `{"code": 3, "scope": 0, "count": 2}`. Blank lines and lines starting with
//! `#` are skipped. A line that is not a dictionary counts as malformed and
//! replay carries on with the next one.

use std::io::BufRead;

use anyhow::{Context, Result, bail};
use tasklink_protocol::{Dictionary, ListId};
use tasklink_runtime::{Comm, CommConfig, ConsumerRegistry};
use tasklink_screens::{ListsScreen, StatusBar, TasksScreen};
use tracing::{debug, warn};

use crate::host::DetachedTransport;
use crate::session::Summary;

#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    pub lists_active: bool,
    pub tasks_active: bool,
    /// List the tasks screen is showing; needed when it is active.
    pub list_id: Option<ListId>,
}

pub fn replay(
    config: CommConfig,
    transcript: impl BufRead,
    options: &ReplayOptions,
) -> Result<Summary> {
    let mut comm = Comm::new(config, DetachedTransport::default(), StatusBar::new());
    comm.open().context("opening the channel")?;

    let mut lists = ListsScreen::new();
    let mut tasks = TasksScreen::new();
    if options.lists_active {
        lists.show();
    }
    if options.tasks_active {
        let Some(list_id) = options.list_id else {
            bail!("an active tasks screen needs a list id");
        };
        tasks.show(list_id, format!("List {list_id}"));
    }

    let mut messages = 0;
    let mut malformed = 0;
    for (number, line) in transcript.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", number + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        messages += 1;
        let message: Dictionary = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(error) => {
                warn!(line = number + 1, %error, "skipping undecodable line");
                malformed += 1;
                continue;
            }
        };
        let mut consumers = ConsumerRegistry::new(&mut lists, &mut tasks);
        match comm.handle_inbound(&message, &mut consumers) {
            Ok(dispatch) => debug!(line = number + 1, ?dispatch, "replayed"),
            Err(_) => malformed += 1,
        }
    }

    let mut summary = Summary::collect(comm.readiness(), &lists, &tasks, comm.status());
    summary.messages = messages;
    summary.malformed = malformed;
    Ok(summary)
}
