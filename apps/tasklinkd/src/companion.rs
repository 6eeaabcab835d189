//! Mock companion: answers the client's Get requests from a [`TaskSource`].

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use tasklink_protocol::{Dictionary, ListId, MessageKey, Opcode, Scope, TaskId, TransportError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::host::HostEvent;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixtureTask {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixtureList {
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<FixtureTask>,
}

/// Where the companion gets its task data from.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn lists(&self) -> Result<Vec<FixtureList>>;

    async fn tasks(&self, list_id: ListId) -> Result<Vec<FixtureTask>>;
}

/// Task data held in memory, loaded from a JSON array of lists.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    lists: Vec<FixtureList>,
}

impl FixtureSource {
    pub fn new(lists: Vec<FixtureList>) -> Self {
        Self { lists }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let lists = serde_json::from_str(text).context("parsing fixture")?;
        Ok(Self::new(lists))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn sample() -> Self {
        let task = |id, title: &str, notes: Option<&str>, done| FixtureTask {
            id: TaskId::new(id),
            title: title.to_owned(),
            notes: notes.map(str::to_owned),
            done,
        };
        Self::new(vec![
            FixtureList {
                id: ListId::new(1),
                title: "Groceries".to_owned(),
                tasks: vec![
                    task(11, "Milk", Some("2 litres, semi-skimmed"), false),
                    task(12, "Bread", None, true),
                    task(13, "Coffee beans", None, false),
                ],
            },
            FixtureList {
                id: ListId::new(2),
                title: "Errands".to_owned(),
                tasks: vec![
                    task(21, "Post office", Some("Parcel for Anna"), false),
                    task(22, "Renew library card", None, false),
                ],
            },
            FixtureList {
                id: ListId::new(3),
                title: "Someday".to_owned(),
                tasks: Vec::new(),
            },
        ])
    }
}

#[async_trait]
impl TaskSource for FixtureSource {
    async fn lists(&self) -> Result<Vec<FixtureList>> {
        Ok(self.lists.clone())
    }

    async fn tasks(&self, list_id: ListId) -> Result<Vec<FixtureTask>> {
        match self.lists.iter().find(|list| list.id == list_id) {
            Some(list) => Ok(list.tasks.clone()),
            None => bail!("Unknown list {list_id}"),
        }
    }
}

pub struct Companion<S> {
    source: S,
    latency: Duration,
}

impl<S: TaskSource> Companion<S> {
    pub fn new(source: S, latency: Duration) -> Self {
        Self { source, latency }
    }

    /// Announces itself after `startup`, then serves requests until the
    /// client hangs up. Every received request is acknowledged with
    /// [`HostEvent::Sent`] before it is answered; one without a code is
    /// refused outright.
    pub async fn run(
        self,
        startup: Duration,
        mut requests: mpsc::Receiver<Dictionary>,
        events: mpsc::Sender<HostEvent>,
    ) {
        tokio::time::sleep(startup).await;
        info!("companion up");
        let ready = Dictionary::new().with(MessageKey::Code, Opcode::Ready.wire());
        if events.send(HostEvent::Inbound(ready)).await.is_err() {
            return;
        }

        while let Some(request) = requests.recv().await {
            if !request.contains(MessageKey::Code) {
                warn!("rejecting request without a code");
                let refused = HostEvent::SendFailed(TransportError::Rejected);
                if events.send(refused).await.is_err() {
                    break;
                }
                continue;
            }
            if events.send(HostEvent::Sent).await.is_err() {
                break;
            }
            tokio::time::sleep(self.latency).await;
            for reply in self.answer(&request).await {
                if events.send(HostEvent::Inbound(reply)).await.is_err() {
                    debug!("client gone");
                    return;
                }
            }
        }
        debug!("request channel closed");
    }

    /// The messages answering one request, in send order.
    pub async fn answer(&self, request: &Dictionary) -> Vec<Dictionary> {
        match self.serve(request).await {
            Ok(replies) => replies,
            Err(error) => {
                warn!(%error, "request failed");
                vec![failure(&error.to_string())]
            }
        }
    }

    async fn serve(&self, request: &Dictionary) -> Result<Vec<Dictionary>> {
        let code = request.int(MessageKey::Code)?;
        if Opcode::from_wire(code) != Some(Opcode::Get) {
            bail!("Unsupported request {code}");
        }
        let raw_scope = request.int(MessageKey::Scope)?;
        let scope = Scope::from_wire(raw_scope)
            .with_context(|| format!("Unsupported scope {raw_scope}"))?;
        debug!(%scope, "serving get");

        match scope {
            Scope::Lists => {
                let lists = self.source.lists().await?;
                let mut replies = vec![start(Scope::Lists, lists.len())];
                replies.extend(lists.iter().enumerate().map(|(index, list)| {
                    item(Scope::Lists, index)
                        .with(MessageKey::ListId, list.id.get())
                        .with(MessageKey::Title, list.title.as_str())
                        .with(MessageKey::Size, count(list.tasks.len()))
                }));
                replies.push(end(Scope::Lists));
                Ok(replies)
            }
            Scope::Tasks => {
                let list_id = ListId::new(request.int32(MessageKey::ListId)?);
                let mut tasks = self.source.tasks(list_id).await?;
                if request.contains(MessageKey::TaskId) {
                    let task_id = TaskId::new(request.int32(MessageKey::TaskId)?);
                    tasks.retain(|task| task.id == task_id);
                    if tasks.is_empty() {
                        bail!("Unknown task {task_id}");
                    }
                }
                let mut replies = vec![
                    start(Scope::Tasks, tasks.len()).with(MessageKey::ListId, list_id.get()),
                ];
                replies.extend(tasks.iter().enumerate().map(|(index, task)| {
                    let mut message = item(Scope::Tasks, index)
                        .with(MessageKey::TaskId, task.id.get())
                        .with(MessageKey::Title, task.title.as_str())
                        .with(MessageKey::IsDone, task.done);
                    if let Some(notes) = &task.notes {
                        message.insert(MessageKey::Notes, notes.as_str());
                    }
                    message
                }));
                replies.push(end(Scope::Tasks));
                Ok(replies)
            }
        }
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn scoped(code: Opcode, scope: Scope) -> Dictionary {
    Dictionary::new()
        .with(MessageKey::Code, code.wire())
        .with(MessageKey::Scope, scope.wire())
}

fn start(scope: Scope, n: usize) -> Dictionary {
    scoped(Opcode::ArrayStart, scope).with(MessageKey::Count, count(n))
}

fn item(scope: Scope, index: usize) -> Dictionary {
    scoped(Opcode::ArrayItem, scope).with(MessageKey::Item, count(index))
}

fn end(scope: Scope) -> Dictionary {
    scoped(Opcode::ArrayEnd, scope)
}

fn failure(text: &str) -> Dictionary {
    Dictionary::new()
        .with(MessageKey::Code, Opcode::Error.wire())
        .with(MessageKey::Error, text)
}
