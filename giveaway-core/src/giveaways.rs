use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::client::RemoteDataClient;
use crate::error::FetchError;
use crate::fetch::{FetchState, RequestId, Tracked};
use crate::filters::{ListQuery, WorthQuery};
use crate::models::{GiveawayDetail, GiveawayId, GiveawaySummary, WorthSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    List,
    Detail,
    Worth,
}

/// Outcome of a fetch task, delivered back to the owning store.
#[derive(Debug)]
pub enum Completion {
    List {
        request: RequestId,
        result: Result<Vec<GiveawaySummary>, FetchError>,
    },
    Detail {
        request: RequestId,
        result: Result<GiveawayDetail, FetchError>,
    },
    Worth {
        request: RequestId,
        result: Result<WorthSummary, FetchError>,
    },
}

impl Completion {
    pub fn resource(&self) -> Resource {
        match self {
            Completion::List { .. } => Resource::List,
            Completion::Detail { .. } => Resource::Detail,
            Completion::Worth { .. } => Resource::Worth,
        }
    }

    pub fn request(&self) -> RequestId {
        match self {
            Completion::List { request, .. }
            | Completion::Detail { request, .. }
            | Completion::Worth { request, .. } => *request,
        }
    }
}

/// What happened to one completion: `applied` is false when it was stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub resource: Resource,
    pub request: RequestId,
    pub applied: bool,
}

/// Tracks the list, detail and worth resources against a [`RemoteDataClient`].
///
/// Fetches run as tokio tasks and only report back through a channel; state
/// changes happen exclusively through `&mut self`, so the owner decides when
/// completions are applied. For each resource the most recently issued request
/// wins: an older response arriving later is discarded. Issuing a request also
/// aborts the superseded task for that resource.
///
/// Requesting requires a running tokio runtime.
pub struct GiveawayStore {
    client: Arc<dyn RemoteDataClient>,
    list: Tracked<Vec<GiveawaySummary>>,
    detail: Tracked<GiveawayDetail>,
    worth: Tracked<WorthSummary>,
    list_task: Option<AbortHandle>,
    detail_task: Option<AbortHandle>,
    worth_task: Option<AbortHandle>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl GiveawayStore {
    pub fn new(client: Arc<dyn RemoteDataClient>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            client,
            list: Tracked::default(),
            detail: Tracked::default(),
            worth: Tracked::default(),
            list_task: None,
            detail_task: None,
            worth_task: None,
            completions_tx,
            completions_rx,
        }
    }

    pub fn list(&self) -> &FetchState<Vec<GiveawaySummary>> {
        self.list.state()
    }

    pub fn detail(&self) -> &FetchState<GiveawayDetail> {
        self.detail.state()
    }

    pub fn worth(&self) -> &FetchState<WorthSummary> {
        self.worth.state()
    }

    pub fn latest_request(&self, resource: Resource) -> RequestId {
        match resource {
            Resource::List => self.list.latest(),
            Resource::Detail => self.detail.latest(),
            Resource::Worth => self.worth.latest(),
        }
    }

    /// True while any resource is waiting for its latest request.
    pub fn is_loading(&self) -> bool {
        self.list.state().is_pending()
            || self.detail.state().is_pending()
            || self.worth.state().is_pending()
    }

    pub fn request_list(&mut self, query: &ListQuery) -> RequestId {
        let request = self.list.begin();
        info!(%request, ?query, "requesting giveaway list");
        let client = Arc::clone(&self.client);
        let query = query.clone();
        let task = self.spawn_fetch(
            async move {
                let result = client.fetch_list(&query).await;
                Completion::List { request, result }
            },
            move |err| Completion::List {
                request,
                result: Err(err),
            },
        );
        supersede(&mut self.list_task, task);
        request
    }

    pub fn request_detail(&mut self, id: GiveawayId) -> RequestId {
        let request = self.detail.begin();
        info!(%request, %id, "requesting giveaway detail");
        let client = Arc::clone(&self.client);
        let task = self.spawn_fetch(
            async move {
                let result = client.fetch_detail(id).await;
                Completion::Detail { request, result }
            },
            move |err| Completion::Detail {
                request,
                result: Err(err),
            },
        );
        supersede(&mut self.detail_task, task);
        request
    }

    pub fn request_worth(&mut self, query: &WorthQuery) -> RequestId {
        let request = self.worth.begin();
        info!(%request, ?query, "requesting worth summary");
        let client = Arc::clone(&self.client);
        let query = query.clone();
        let task = self.spawn_fetch(
            async move {
                let result = client.fetch_worth_summary(&query).await;
                Completion::Worth { request, result }
            },
            move |err| Completion::Worth {
                request,
                result: Err(err),
            },
        );
        supersede(&mut self.worth_task, task);
        request
    }

    /// Drops the loaded detail and ignores any detail response still in flight.
    pub fn clear_detail(&mut self) {
        self.detail.reset();
        if let Some(task) = self.detail_task.take() {
            task.abort();
        }
    }

    /// Applies one completion if it answers the latest request of its resource.
    pub fn apply(&mut self, completion: Completion) -> Settled {
        let resource = completion.resource();
        let request = completion.request();
        let failure = match &completion {
            Completion::List { result, .. } => result.as_ref().err().cloned(),
            Completion::Detail { result, .. } => result.as_ref().err().cloned(),
            Completion::Worth { result, .. } => result.as_ref().err().cloned(),
        };

        let applied = match completion {
            Completion::List { request, result } => self.list.settle(request, result),
            Completion::Detail { request, result } => self.detail.settle(request, result),
            Completion::Worth { request, result } => self.worth.settle(request, result),
        };

        match (applied, failure) {
            (false, _) => debug!(
                ?resource,
                %request,
                latest = %self.latest_request(resource),
                "discarding stale response"
            ),
            (true, Some(err)) => warn!(?resource, %request, error = %err, "fetch failed"),
            (true, None) => debug!(?resource, %request, "fetch completed"),
        }

        Settled {
            resource,
            request,
            applied,
        }
    }

    /// Waits for the next completion and applies it.
    pub async fn process_next(&mut self) -> Option<Settled> {
        let completion = self.completions_rx.recv().await?;
        Some(self.apply(completion))
    }

    /// Applies every completion that has already arrived, without waiting.
    pub fn drain_ready(&mut self) -> Vec<Settled> {
        let mut settled = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            settled.push(self.apply(completion));
        }
        settled
    }

    /// Processes completions until no resource is pending.
    pub async fn settle(&mut self) {
        while self.is_loading() {
            if self.process_next().await.is_none() {
                break;
            }
        }
    }

    /// Runs `fetch` on its own task and reports its outcome. A fetch that
    /// dies is reported through `on_failure`; an aborted one stays silent.
    /// The returned handle aborts the fetch itself.
    fn spawn_fetch<F, E>(&self, fetch: F, on_failure: E) -> AbortHandle
    where
        F: Future<Output = Completion> + Send + 'static,
        E: FnOnce(FetchError) -> Completion + Send + 'static,
    {
        let tx = self.completions_tx.clone();
        let fetch_task = tokio::spawn(fetch);
        let abort = fetch_task.abort_handle();
        tokio::spawn(async move {
            let completion = match fetch_task.await {
                Ok(completion) => completion,
                Err(err) if err.is_cancelled() => return,
                Err(err) => {
                    warn!(error = %err, "fetch task failed");
                    on_failure(FetchError::Network(format!("fetch task failed: {err}")))
                }
            };
            if tx.send(completion).is_err() {
                debug!("giveaway store dropped before fetch completed");
            }
        });
        abort
    }
}

impl Drop for GiveawayStore {
    fn drop(&mut self) {
        for task in [&mut self.list_task, &mut self.detail_task, &mut self.worth_task] {
            if let Some(task) = task.take() {
                task.abort();
            }
        }
    }
}

fn supersede(slot: &mut Option<AbortHandle>, task: AbortHandle) {
    if let Some(previous) = slot.replace(task) {
        previous.abort();
    }
}
