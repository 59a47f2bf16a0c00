//! RankingClient against an in-process axum server.

use std::sync::{Arc, Mutex};

use axum::{http::StatusCode, routing::post, Json, Router};
use ranking_client::{RankingClient, RankingError, RankingService, MATCH_PATH};
use serde_json::{json, Value};
use theramatch_common::{Message, RankingRequest};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn request() -> RankingRequest {
    RankingRequest::snapshot(&[
        Message::user("Looking for help with anxiety"),
        Message::assistant("Any preference on session type?"),
    ])
}

fn profile(uuid: &str, rank: u32) -> Value {
    json!({
        "uuid": uuid,
        "id": rank,
        "listingName": format!("Therapist {rank}"),
        "aiRank": rank,
        "aiDescription": "Specialises in anxiety."
    })
}

#[tokio::test]
async fn posts_transcript_and_returns_validated_result() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let captured = seen.clone();

    let router = Router::new().route(
        MATCH_PATH,
        post(move |Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                *captured.lock().unwrap() = Some(body);
                Json(json!({
                    "profiles": [profile("u1", 1), profile("u2", 2)],
                    "aiAnalysis": {"rankedMatches": [
                        {"originalId": 1, "rank": 1, "description": "Top"},
                        {"originalId": 2, "rank": 2, "description": "Next"}
                    ]}
                }))
            }
        }),
    );
    let base = serve(router).await;

    let client = RankingClient::new(&format!("{base}/"));
    assert_eq!(client.endpoint(), format!("{base}/api/match"));

    let result = client.submit(&request()).await.unwrap();
    assert_eq!(result.profiles.len(), 2);
    assert_eq!(result.profiles[0].uuid, "u1");
    assert_eq!(result.ai_analysis.ranked_matches.len(), 2);

    let body = seen.lock().unwrap().clone().unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["content"], "Any preference on session type?");
}

#[tokio::test]
async fn non_success_status_is_request_failed() {
    let router = Router::new().route(
        MATCH_PATH,
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = serve(router).await;

    let err = RankingClient::new(&base).submit(&request()).await.unwrap_err();
    match err {
        RankingError::RequestFailed(message) => assert!(message.contains("500")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_request_failed() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = RankingClient::new(&format!("http://{addr}"))
        .submit(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, RankingError::RequestFailed(_)));
}

#[tokio::test]
async fn empty_profiles_is_invalid_response() {
    let router = Router::new().route(
        MATCH_PATH,
        post(|| async { Json(json!({"profiles": [], "aiAnalysis": {"rankedMatches": []}})) }),
    );
    let base = serve(router).await;

    let err = RankingClient::new(&base).submit(&request()).await.unwrap_err();
    assert!(matches!(err, RankingError::InvalidResponse(_)));
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let router = Router::new().route(MATCH_PATH, post(|| async { "<html>oops</html>" }));
    let base = serve(router).await;

    let err = RankingClient::new(&base).submit(&request()).await.unwrap_err();
    assert!(matches!(err, RankingError::InvalidResponse(_)));
}

#[tokio::test]
async fn embedded_analysis_error_is_surfaced() {
    let router = Router::new().route(
        MATCH_PATH,
        post(|| async {
            Json(json!({
                "profiles": [profile("u1", 1)],
                "aiAnalysis": {"error": "Ranking model unavailable"}
            }))
        }),
    );
    let base = serve(router).await;

    let err = RankingClient::new(&base).submit(&request()).await.unwrap_err();
    match err {
        RankingError::UpstreamAnalysisError(message) => {
            assert_eq!(message, "Ranking model unavailable")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
