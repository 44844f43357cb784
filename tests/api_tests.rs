use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use podcast_recommender::api::{create_router, AppState};
use podcast_recommender::config::Config;

fn create_test_server() -> TestServer {
    let state = AppState::offline();
    let app = create_router(state, &Config::default());
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let server = create_test_server();
    let response = server.get("/api/health").await;

    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-frame-options"), "DENY");
    assert_eq!(response.header("x-xss-protection"), "1; mode=block");
    assert_eq!(
        response.header("strict-transport-security"),
        "max-age=31536000; includeSubDomains"
    );
    let request_id = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f1c2b9e-1d3a-4c55-9a7e-2f0b8d4e6a11";

    let response = server
        .get("/api/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_recommend_for_founder_profile() {
    let server = create_test_server();

    let response = server
        .post("/api/recommend")
        .json(&json!({
            "linkedinUrl": "https://www.linkedin.com/in/jane-doe",
            "wantsToBeFeatured": true
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(!recommendations.is_empty());
    assert!(recommendations.len() <= 10);
    for recommendation in recommendations {
        assert!(!recommendation["reasons"].as_array().unwrap().is_empty());
        assert!(recommendation["title"].is_string());
    }

    let profile = &body["profile"];
    assert_eq!(profile["name"], "Jane Doe");
    assert_eq!(profile["skills"].as_array().unwrap().len(), 5);
    assert_eq!(profile["expertiseLevel"], "expert");
    let opportunities = profile["featuredOpportunities"].as_array().unwrap();
    assert!(opportunities.contains(&json!("Founder Stories")));
    assert!(opportunities.contains(&json!("Tech Talks")));
}

#[tokio::test]
async fn test_recommend_without_featuring_hides_opportunities() {
    let server = create_test_server();

    let response = server
        .post("/api/recommend")
        .json(&json!({ "linkedinUrl": "https://linkedin.com/in/jane-doe" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["profile"]["featuredOpportunities"]
        .as_array()
        .unwrap()
        .is_empty());
    assert_eq!(body["profile"]["expertiseLevel"], "intermediate");
}

#[tokio::test]
async fn test_recommend_requires_url() {
    let server = create_test_server();

    let response = server
        .post("/api/recommend")
        .json(&json!({ "wantsToBeFeatured": true }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "LinkedIn URL is required");
}

#[tokio::test]
async fn test_recommend_rejects_malformed_url() {
    let server = create_test_server();

    let response = server
        .post("/api/recommend")
        .json(&json!({ "linkedinUrl": "https://example.com/in/jane-doe" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid LinkedIn URL format"));
}

#[tokio::test]
async fn test_recommend_malformed_bodies_use_error_shape() {
    let server = create_test_server();

    for body in [
        json!({ "linkedinUrl": 123 }),
        json!({ "linkedinUrl": "https://linkedin.com/in/jane-doe", "wantsToBeFeatured": null }),
    ] {
        let response = server.post("/api/recommend").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }
}

#[tokio::test]
async fn test_recommend_without_json_content_type() {
    let server = create_test_server();

    let response = server
        .post("/api/recommend")
        .text(r#"{"linkedinUrl": "https://linkedin.com/in/jane-doe"}"#)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_search_rejects_bad_paging() {
    let server = create_test_server();

    let response = server
        .get("/api/podcasts/search")
        .add_query_param("q", "business")
        .add_query_param("offset", "abc")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
}

#[tokio::test]
async fn test_search_with_category_filter() {
    let server = create_test_server();

    let response = server
        .get("/api/podcasts/search")
        .add_query_param("q", "business")
        .add_query_param("categories", "Business")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 5);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["results"][0]["title"], "Business Wars");
}

#[tokio::test]
async fn test_search_past_last_page() {
    let server = create_test_server();

    let response = server
        .get("/api/podcasts/search")
        .add_query_param("q", "business")
        .add_query_param("categories", "Business")
        .add_query_param("offset", 10)
        .add_query_param("limit", 10)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 5);
    assert!(body["results"].as_array().unwrap().is_empty());
}
