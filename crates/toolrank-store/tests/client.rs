//! Integration tests for `StoreClient` using wiremock HTTP mocks.

use chrono::NaiveDate;
use toolrank_core::{RankType, Region};
use toolrank_store::{FavoriteAction, StoreClient};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> StoreClient {
    StoreClient::new(base_url, "test-anon-key", 30).expect("client construction should not fail")
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("date literal")
}

fn site_json(id: i64, name: &str, region: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "url": format!("https://{}.example.com", name.to_lowercase()),
        "description": format!("{name} does things"),
        "category_id": 1,
        "is_free": true,
        "pricing_model": "freemium",
        "innovation_score": 80.0,
        "uniqueness_score": 60.0,
        "user_rating": 4.5,
        "region": region,
        "status": "active",
        "created_at": "2025-06-01T00:00:00Z"
    })
}

fn ranking_json(
    id: i64,
    site_id: i64,
    region: &str,
    position: i32,
    score: f64,
    period_end: &str,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "site_id": site_id,
        "rank_type": "daily_activity",
        "region": region,
        "rank_position": position,
        "score": score,
        "period_start": period_end,
        "period_end": period_end
    })
}

#[tokio::test]
async fn list_active_sites_sends_filters_and_parses_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ai_sites"))
        .and(query_param("status", "eq.active"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            site_json(1, "Chatter", "global"),
            site_json(2, "Kimi", "domestic"),
        ])))
        .mount(&server)
        .await;

    let sites = test_client(&server.uri())
        .list_active_sites()
        .await
        .expect("should parse sites");

    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].name, "Chatter");
    assert_eq!(sites[1].region, Region::Domestic);
}

#[tokio::test]
async fn get_site_returns_none_for_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ai_sites"))
        .and(query_param("id", "eq.404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let site = test_client(&server.uri())
        .get_site(404)
        .await
        .expect("empty result is not an error");
    assert!(site.is_none());
}

#[tokio::test]
async fn activity_since_orders_ascending_by_record_date() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/activity_history"))
        .and(query_param("site_id", "eq.7"))
        .and(query_param("record_date", "gte.2025-07-07"))
        .and(query_param("order", "record_date.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 1,
                "site_id": 7,
                "activity_score": 70.0,
                "daily_visits_estimate": 50_000,
                "social_mentions": 120,
                "record_date": "2025-07-07",
                "trend": "rising"
            }
        ])))
        .mount(&server)
        .await;

    let records = test_client(&server.uri())
        .activity_since(7, date("2025-07-07"))
        .await
        .expect("should parse records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].site_id, 7);
}

#[tokio::test]
async fn load_ranking_book_groups_period_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/rankings"))
        .and(query_param("period_end", "eq.2025-08-05"))
        .and(query_param("region", "eq.global"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ranking_json(1, 10, "global", 1, 90.0, "2025-08-05"),
            ranking_json(2, 11, "global", 2, 70.0, "2025-08-05"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/rankings"))
        .and(query_param("period_end", "eq.2025-08-05"))
        .and(query_param("region", "eq.domestic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ranking_json(3, 20, "domestic", 1, 85.0, "2025-08-05"),
        ])))
        .mount(&server)
        .await;

    let book = test_client(&server.uri())
        .load_ranking_book(date("2025-08-05"), 1000)
        .await
        .expect("should load book");

    assert_eq!(book.rows(Region::Global, RankType::DailyActivity).len(), 2);
    assert_eq!(book.rows(Region::Domestic, RankType::DailyActivity).len(), 1);
}

#[tokio::test]
async fn load_ranking_book_falls_back_to_latest_period() {
    let server = MockServer::start().await;

    // Nothing for yesterday's period, in either region.
    Mock::given(method("GET"))
        .and(path("/rest/v1/rankings"))
        .and(query_param("period_end", "eq.2025-08-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    // The latest-anything query returns a mix of periods; only the newest
    // may survive, with both regions represented.
    Mock::given(method("GET"))
        .and(path("/rest/v1/rankings"))
        .and(query_param("region", "in.(global,domestic)"))
        .and(query_param("order", "period_end.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ranking_json(1, 10, "global", 1, 90.0, "2025-08-02"),
            ranking_json(2, 20, "domestic", 1, 80.0, "2025-08-02"),
            ranking_json(3, 11, "global", 1, 95.0, "2025-07-29"),
        ])))
        .mount(&server)
        .await;

    let book = test_client(&server.uri())
        .load_ranking_book(date("2025-08-05"), 1000)
        .await
        .expect("fallback should load");

    assert_eq!(book.board_count(), 2);
    let global = book.rows(Region::Global, RankType::DailyActivity);
    assert_eq!(global.len(), 1, "stale 2025-07-29 row must be dropped");
    assert_eq!(global[0].period_end, date("2025-08-02"));
    assert_eq!(book.rows(Region::Domestic, RankType::DailyActivity).len(), 1);
}

#[tokio::test]
async fn find_domestic_site_id_filters_by_name_and_region() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ai_sites"))
        .and(query_param("select", "id"))
        .and(query_param("name", "eq.Kimi"))
        .and(query_param("region", "eq.domestic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 42}])))
        .mount(&server)
        .await;

    let id = test_client(&server.uri())
        .find_domestic_site_id("Kimi")
        .await
        .expect("lookup should succeed");
    assert_eq!(id, Some(42));
}

#[tokio::test]
async fn manage_favorite_posts_function_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/manage-favorite"))
        .and(body_json(serde_json::json!({
            "action": "add",
            "site_id": 7,
            "user_id": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    test_client(&server.uri())
        .manage_favorite(FavoriteAction::Add, 7, None)
        .await
        .expect("favorite call should succeed");
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/site_categories"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "Invalid API key"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .list_categories()
        .await
        .expect_err("401 must be an error");
    let msg = err.to_string();
    assert!(
        msg.contains("Invalid API key"),
        "expected error message to contain 'Invalid API key', got: {msg}"
    );
}

#[tokio::test]
async fn malformed_row_is_a_deserialize_error_with_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ai_sites"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": "not-a-number"}])),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .list_active_sites()
        .await
        .expect_err("bad row must fail decoding");
    assert!(err.to_string().contains("list_active_sites"));
}
