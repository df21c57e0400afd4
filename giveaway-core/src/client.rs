use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect, Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ConfigError, FetchError};
use crate::filters::{ListQuery, WorthQuery};
use crate::models::{
    GiveawayDetail, GiveawayId, GiveawaySummary, WireGiveaway, WireWorth, WorthSummary,
};

/// Read access to the remote giveaway catalog.
///
/// Implementations must be cheap to share: the store clones an `Arc` of the
/// client into every fetch task.
#[async_trait]
pub trait RemoteDataClient: Send + Sync {
    async fn fetch_list(&self, query: &ListQuery) -> Result<Vec<GiveawaySummary>, FetchError>;

    /// Fails with [`FetchError::NotFound`] when the catalog has no such id.
    async fn fetch_detail(&self, id: GiveawayId) -> Result<GiveawayDetail, FetchError>;

    async fn fetch_worth_summary(&self, query: &WorthQuery) -> Result<WorthSummary, FetchError>;
}

/// HTTP client for the GamerPower API.
#[derive(Debug, Clone)]
pub struct GamerPowerClient {
    http: Client,
    giveaways_url: Url,
    giveaway_url: Url,
    worth_url: Url,
}

/// Body sent with a 2xx status when the catalog has nothing to return.
#[derive(Debug, Deserialize)]
struct WireStatus {
    status: i64,
    #[serde(default)]
    status_message: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetailBody {
    Found(WireGiveaway),
    Missing(WireStatus),
}

impl GamerPowerClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = ClientBuilder::new()
            .redirect(redirect::Policy::limited(5))
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Self::with_client(http, &config.base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ConfigError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http,
            giveaways_url: base.join("giveaways")?,
            giveaway_url: base.join("giveaway")?,
            worth_url: base.join("worth")?,
        })
    }

    async fn get(
        &self,
        url: &Url,
        query: &[(&str, String)],
    ) -> Result<(StatusCode, Vec<u8>), FetchError> {
        debug!(%url, ?query, "requesting catalog");
        let response = self.http.get(url.clone()).query(query).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }
}

fn filter_params(platform: &Option<String>, kind: &Option<String>) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(platform) = platform {
        params.push(("platform", platform.clone()));
    }
    if let Some(kind) = kind {
        params.push(("type", kind.clone()));
    }
    params
}

fn unexpected_status(url: &Url, status: StatusCode) -> FetchError {
    warn!(%url, %status, "catalog returned an error status");
    FetchError::Network(format!("unexpected status {status} from {url}"))
}

#[async_trait]
impl RemoteDataClient for GamerPowerClient {
    async fn fetch_list(&self, query: &ListQuery) -> Result<Vec<GiveawaySummary>, FetchError> {
        let mut params = filter_params(&query.platform, &query.kind);
        params.push(("sort-by", query.sort_by.as_str().to_owned()));

        let (status, body) = self.get(&self.giveaways_url, &params).await?;
        match status {
            StatusCode::OK => {
                let wire: Vec<WireGiveaway> = serde_json::from_slice(&body)?;
                info!(count = wire.len(), "fetched giveaways");
                Ok(wire.into_iter().map(WireGiveaway::into_summary).collect())
            }
            StatusCode::CREATED => {
                info!("no active giveaways for the current filters");
                Ok(Vec::new())
            }
            other => Err(unexpected_status(&self.giveaways_url, other)),
        }
    }

    async fn fetch_detail(&self, id: GiveawayId) -> Result<GiveawayDetail, FetchError> {
        let params = [("id", id.to_string())];
        let (status, body) = self.get(&self.giveaway_url, &params).await?;
        match status {
            StatusCode::OK | StatusCode::CREATED => {
                match serde_json::from_slice::<DetailBody>(&body)? {
                    DetailBody::Found(wire) => Ok(wire.into_detail()),
                    DetailBody::Missing(missing) => {
                        debug!(
                            %id,
                            status = missing.status,
                            message = %missing.status_message,
                            "giveaway missing"
                        );
                        Err(FetchError::NotFound(id))
                    }
                }
            }
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(id)),
            other => Err(unexpected_status(&self.giveaway_url, other)),
        }
    }

    async fn fetch_worth_summary(&self, query: &WorthQuery) -> Result<WorthSummary, FetchError> {
        let params = filter_params(&query.platform, &query.kind);
        let (status, body) = self.get(&self.worth_url, &params).await?;
        match status {
            StatusCode::OK => {
                let wire: WireWorth = serde_json::from_slice(&body)?;
                WorthSummary::try_from(wire)
            }
            StatusCode::CREATED => Ok(WorthSummary {
                total_usd: 0.0,
                active_count: 0,
            }),
            other => Err(unexpected_status(&self.worth_url, other)),
        }
    }
}
