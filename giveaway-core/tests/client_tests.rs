use giveaway_core::{
    FetchError, GamerPowerClient, GiveawayId, ListQuery, RemoteDataClient, Worth, WorthQuery,
};
use reqwest::Client;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_giveaways() -> &'static str {
    r#"[
  {
    "id": 2849,
    "title": "Alpha Quest (Epic Games) Giveaway",
    "worth": "$24.99",
    "thumbnail": "https://www.gamerpower.com/offers/1/2849.jpg",
    "image": "https://www.gamerpower.com/offers/1b/2849.jpg",
    "description": "Download Alpha Quest for free via the Epic Games Store!",
    "instructions": "1. Click the button\r\n2. Log in",
    "open_giveaway_url": "https://www.gamerpower.com/open/alpha-quest",
    "published_date": "2024-10-17 11:02:14",
    "type": "Game",
    "platforms": "PC, Epic Games Store",
    "end_date": "2024-10-24 23:59:00",
    "users": 5110,
    "status": "Active",
    "gamerpower_url": "https://www.gamerpower.com/alpha-quest"
  },
  {
    "id": "2850",
    "title": "Beta Run Loot",
    "worth": "N/A",
    "thumbnail": "https://www.gamerpower.com/offers/1/2850.jpg",
    "description": "Loot pack",
    "type": "DLC (Loot)",
    "platforms": "Steam",
    "end_date": "N/A"
  }
]"#
}

async fn client_for(server: &MockServer) -> GamerPowerClient {
    GamerPowerClient::with_client(Client::new(), &format!("{}/api", server.uri())).unwrap()
}

#[tokio::test]
async fn fetch_list_sends_filters_and_normalises_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/giveaways"))
        .and(query_param("platform", "pc"))
        .and(query_param("type", "game"))
        .and(query_param("sort-by", "value"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(sample_giveaways()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let query = ListQuery::parse("pc", "game", "value").unwrap();
    let list = client.fetch_list(&query).await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, GiveawayId(2849));
    assert_eq!(list[0].platforms, vec!["PC", "Epic Games Store"]);
    assert_eq!(list[0].worth, Worth::Label("$24.99".into()));
    assert!(list[0].end_date.is_some());
    assert_eq!(list[1].id, GiveawayId(2850));
    assert_eq!(list[1].end_date, None);
}

#[tokio::test]
async fn no_active_giveaways_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/giveaways"))
        .respond_with(ResponseTemplate::new(201).set_body_string(
            r#"{"status":0,"status_message":"No active giveaways available at the moment, please try again later."}"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let list = client.fetch_list(&ListQuery::default()).await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn fetch_detail_maps_claim_fields() {
    let server = MockServer::start().await;
    let single = r#"{
    "id": 2849,
    "title": "Alpha Quest (Epic Games) Giveaway",
    "worth": "$24.99",
    "description": "Download Alpha Quest for free via the Epic Games Store!",
    "instructions": "1. Click the button\r\n2. Log in",
    "open_giveaway_url": "https://www.gamerpower.com/open/alpha-quest",
    "published_date": "2024-10-17 11:02:14",
    "type": "Game",
    "platforms": "PC, Epic Games Store",
    "end_date": "2024-10-24 23:59:00",
    "users": 5110,
    "status": "Active"
}"#;
    Mock::given(method("GET"))
        .and(path("/api/giveaway"))
        .and(query_param("id", "2849"))
        .respond_with(ResponseTemplate::new(200).set_body_string(single))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let detail = client.fetch_detail(GiveawayId(2849)).await.unwrap();

    assert_eq!(detail.summary.title, "Alpha Quest (Epic Games) Giveaway");
    assert_eq!(detail.claim_url, "https://www.gamerpower.com/open/alpha-quest");
    assert!(detail.instructions.starts_with("1. Click"));
    assert_eq!(detail.users, Some(5110));
    assert!(detail.published_date.is_some());
}

#[tokio::test]
async fn missing_detail_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/giveaway"))
        .and(query_param("id", "999"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_string(r#"{"status":0,"status_message":"No giveaway found"}"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/giveaway"))
        .and(query_param("id", "404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(
        client.fetch_detail(GiveawayId(999)).await,
        Err(FetchError::NotFound(GiveawayId(999)))
    );
    assert_eq!(
        client.fetch_detail(GiveawayId(404)).await,
        Err(FetchError::NotFound(GiveawayId(404)))
    );
}

#[tokio::test]
async fn fetch_worth_parses_estimation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/worth"))
        .and(query_param("platform", "steam"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"active_giveaways_number":42,"worth_estimation_usd":"1,500,000.00"}"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let worth = client
        .fetch_worth_summary(&WorthQuery::parse("steam", "").unwrap())
        .await
        .unwrap();

    assert_eq!(worth.active_count, 42);
    assert_eq!(worth.total_usd, 1_500_000.0);
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/giveaways"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.fetch_list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/worth"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .fetch_worth_summary(&WorthQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let client = GamerPowerClient::with_client(Client::new(), "http://127.0.0.1:1/api").unwrap();
    let err = client.fetch_list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
}
