#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use giveaway_core::{
    FetchError, GiveawayDetail, GiveawayId, GiveawaySummary, ListQuery, RemoteDataClient, Worth,
    WorthQuery, WorthSummary,
};
use tokio::sync::oneshot;

pub fn summary(id: u64, title: &str) -> GiveawaySummary {
    GiveawaySummary {
        id: GiveawayId(id),
        title: title.to_owned(),
        thumbnail: format!("https://img.example.com/{id}.jpg"),
        platforms: vec!["PC".to_owned(), "Steam".to_owned()],
        worth: Worth::Label("$9.99".to_owned()),
        kind: "Game".to_owned(),
        end_date: None,
        short_description: String::new(),
    }
}

pub fn detail(id: u64, title: &str) -> GiveawayDetail {
    GiveawayDetail {
        summary: summary(id, title),
        description: "Full description".to_owned(),
        instructions: "1. Click the button".to_owned(),
        claim_url: format!("https://claim.example.com/{id}"),
        image: String::new(),
        published_date: None,
        users: Some(100),
        status: "Active".to_owned(),
        gamerpower_url: String::new(),
    }
}

pub fn temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "{prefix}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

/// Answers every call immediately with canned data and records what was asked.
pub struct StubClient {
    pub list: Result<Vec<GiveawaySummary>, FetchError>,
    pub details: HashMap<GiveawayId, GiveawayDetail>,
    pub worth: Result<WorthSummary, FetchError>,
    pub calls: Mutex<Vec<String>>,
}

impl StubClient {
    pub fn new(list: Vec<GiveawaySummary>) -> Self {
        Self {
            list: Ok(list),
            details: HashMap::new(),
            worth: Ok(WorthSummary {
                total_usd: 0.0,
                active_count: 0,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_detail(mut self, detail: GiveawayDetail) -> Self {
        self.details.insert(detail.summary.id, detail);
        self
    }

    pub fn with_worth(mut self, worth: WorthSummary) -> Self {
        self.worth = Ok(worth);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RemoteDataClient for StubClient {
    async fn fetch_list(&self, query: &ListQuery) -> Result<Vec<GiveawaySummary>, FetchError> {
        self.record(format!("list {:?}", query.platform));
        self.list.clone()
    }

    async fn fetch_detail(&self, id: GiveawayId) -> Result<GiveawayDetail, FetchError> {
        self.record(format!("detail {id}"));
        self.details.get(&id).cloned().ok_or(FetchError::NotFound(id))
    }

    async fn fetch_worth_summary(&self, query: &WorthQuery) -> Result<WorthSummary, FetchError> {
        self.record(format!("worth {:?}", query.platform));
        self.worth.clone()
    }
}

type Gate<T> = oneshot::Receiver<Result<T, FetchError>>;

/// List fetches block until the test releases them, keyed by platform, so
/// tests control the order in which responses arrive.
#[derive(Default)]
pub struct GatedClient {
    lists: Mutex<HashMap<Option<String>, Gate<Vec<GiveawaySummary>>>>,
}

impl GatedClient {
    pub fn gate_list(
        &self,
        platform: Option<&str>,
    ) -> oneshot::Sender<Result<Vec<GiveawaySummary>, FetchError>> {
        let (tx, rx) = oneshot::channel();
        self.lists
            .lock()
            .unwrap()
            .insert(platform.map(str::to_owned), rx);
        tx
    }
}

#[async_trait]
impl RemoteDataClient for GatedClient {
    async fn fetch_list(&self, query: &ListQuery) -> Result<Vec<GiveawaySummary>, FetchError> {
        let gate = self.lists.lock().unwrap().remove(&query.platform);
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".into()))),
            None => Err(FetchError::Network("no gate registered".into())),
        }
    }

    async fn fetch_detail(&self, id: GiveawayId) -> Result<GiveawayDetail, FetchError> {
        Err(FetchError::NotFound(id))
    }

    async fn fetch_worth_summary(&self, _query: &WorthQuery) -> Result<WorthSummary, FetchError> {
        Ok(WorthSummary {
            total_usd: 1.0,
            active_count: 1,
        })
    }
}

/// Never answers; completions in tests using it are built by hand.
pub struct SilentClient;

#[async_trait]
impl RemoteDataClient for SilentClient {
    async fn fetch_list(&self, _query: &ListQuery) -> Result<Vec<GiveawaySummary>, FetchError> {
        std::future::pending().await
    }

    async fn fetch_detail(&self, _id: GiveawayId) -> Result<GiveawayDetail, FetchError> {
        std::future::pending().await
    }

    async fn fetch_worth_summary(&self, _query: &WorthQuery) -> Result<WorthSummary, FetchError> {
        std::future::pending().await
    }
}

/// Every fetch panics inside the client.
pub struct PanicClient;

#[async_trait]
impl RemoteDataClient for PanicClient {
    async fn fetch_list(&self, _query: &ListQuery) -> Result<Vec<GiveawaySummary>, FetchError> {
        panic!("list fetch blew up")
    }

    async fn fetch_detail(&self, _id: GiveawayId) -> Result<GiveawayDetail, FetchError> {
        panic!("detail fetch blew up")
    }

    async fn fetch_worth_summary(&self, _query: &WorthQuery) -> Result<WorthSummary, FetchError> {
        panic!("worth fetch blew up")
    }
}
