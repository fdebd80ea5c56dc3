use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use vivah_auth::auth_routes;

use crate::{
    handlers::{
        health::livez,
        likes::{create_like, get_like, list_likes},
        matches::{create_match, get_match, list_matches, update_match},
        messages::{create_message, get_message, list_chat_messages},
        profiles::{get_profile, update_profile},
    },
    state::AppState,
};

/// Upper bound on handling one request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // API routes, all behind a bearer token
    let api_routes = Router::new()
        // Profile routes
        .route("/profiles/{user_id}", get(get_profile))
        .route("/profile", put(update_profile))
        // Match routes
        .route("/matches", get(list_matches).post(create_match))
        .route("/matches/{match_id}", get(get_match).put(update_match))
        // Like routes
        .route("/likes", get(list_likes).post(create_like))
        .route("/likes/{liked_user_id}", get(get_like))
        // Message routes
        .route("/messages", post(create_message))
        .route("/messages/{message_id}", get(get_message))
        .route("/chats/{chat_id}/messages", get(list_chat_messages));

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .merge(auth_routes().with_state(state.auth.clone()))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Register a user and return `(token, user_id)`.
    async fn register(app: &Router, email: &str) -> (String, String) {
        let (status, body) = send(
            app,
            "POST",
            "/auth/register",
            None,
            Some(json!({ "email": email, "password": "correct horse" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        (
            body["token"].as_str().unwrap().to_string(),
            body["user_id"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_livez() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, _) = send(&app, "GET", "/livez", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (state, _) = test_state();
        let app = create_app(state);
        let (_, user_id) = register(&app, "asha@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": "correct horse" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["user_id"], user_id.as_str());

        let (status, body) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": "wrong" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_api_requires_token() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, _) = send(&app, "GET", "/api/matches", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "GET", "/api/matches", Some("not-a-token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_upsert_and_get() {
        let (state, _) = test_state();
        let app = create_app(state);
        let (token, user_id) = register(&app, "ravi@example.com").await;
        let uri = format!("/api/profiles/{user_id}");

        let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "PUT", "/api/profile", Some(&token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "PUT",
            "/api/profile",
            Some(&token),
            Some(json!({ "name": "Ravi", "height": 178, "interests": ["cricket"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user_id"], user_id.as_str());

        let (status, _) = send(
            &app,
            "PUT",
            "/api/profile",
            Some(&token),
            Some(json!({ "bio": "Engineer in Pune" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Ravi");
        assert_eq!(body["data"]["bio"], "Engineer in Pune");
        assert_eq!(body["data"]["interests"], json!(["cricket"]));
    }

    #[tokio::test]
    async fn test_mutual_like_creates_matches() {
        let (state, _) = test_state();
        let app = create_app(state);
        let (token_a, a) = register(&app, "a@example.com").await;
        let (token_b, b) = register(&app, "b@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/likes",
            Some(&token_a),
            Some(json!({ "liked_user_id": b })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"], false);

        let (status, body) = send(
            &app,
            "POST",
            "/api/likes",
            Some(&token_b),
            Some(json!({ "liked_user_id": a })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"], true);

        // Liking again must not duplicate the match.
        send(
            &app,
            "POST",
            "/api/likes",
            Some(&token_a),
            Some(json!({ "liked_user_id": b })),
        )
        .await;

        let (_, body) = send(&app, "GET", "/api/matches", Some(&token_a), None).await;
        let matches = body["data"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["matched_user_id"], b.as_str());

        let (_, body) = send(&app, "GET", "/api/matches", Some(&token_b), None).await;
        let matches = body["data"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["matched_user_id"], a.as_str());

        let (status, _) = send(&app, "GET", &format!("/api/likes/{a}"), Some(&token_b), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", &format!("/api/likes/{a}"), Some(&token_a), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_repeated_like_keeps_original_record() {
        let (state, _) = test_state();
        let likes = state.likes.clone();
        let app = create_app(state);
        let (token_a, a) = register(&app, "first@example.com").await;
        let (_, b) = register(&app, "second@example.com").await;

        let earlier = chrono::Utc::now() - chrono::Duration::days(3);
        let original = vivah_core::entities::Like::new(a.as_str(), b.as_str(), earlier);
        likes.create_like(&original).await.unwrap();

        let (status, body) = send(
            &app,
            "POST",
            "/api/likes",
            Some(&token_a),
            Some(json!({ "liked_user_id": b })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Like already exists");
        assert_eq!(body["data"]["created_at"], original.created_at.as_str());

        let (_, body) = send(&app, "GET", &format!("/api/likes/{b}"), Some(&token_a), None).await;
        assert_eq!(body["data"]["created_at"], original.created_at.as_str());

        let (_, body) = send(&app, "GET", "/api/likes", Some(&token_a), None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_self_like_is_rejected() {
        let (state, _) = test_state();
        let app = create_app(state);
        let (token, user_id) = register(&app, "solo@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/likes",
            Some(&token),
            Some(json!({ "liked_user_id": user_id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "cannot like yourself");
    }

    #[tokio::test]
    async fn test_match_crud() {
        let (state, _) = test_state();
        let app = create_app(state);
        let (token, _) = register(&app, "m@example.com").await;

        let (status, body) = send(&app, "POST", "/api/matches", Some(&token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "matched_user_id is required");

        let (status, body) = send(
            &app,
            "POST",
            "/api/matches",
            Some(&token),
            Some(json!({ "matched_user_id": "u2" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let match_id = body["data"]["match_id"].as_str().unwrap().to_string();
        let uri = format!("/api/matches/{match_id}");

        let (status, body) = send(
            &app,
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "matched_user_id": "u3" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["match_id"], match_id.as_str());

        let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["matched_user_id"], "u3");

        let (status, _) = send(
            &app,
            "PUT",
            "/api/matches/missing",
            Some(&token),
            Some(json!({ "matched_user_id": "u3" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_chat_messages_are_listed_in_order() {
        let (state, _) = test_state();
        let app = create_app(state);
        let (token_a, _) = register(&app, "x@example.com").await;
        let (token_b, _) = register(&app, "y@example.com").await;

        let (status, body) =
            send(&app, "GET", "/api/chats/c1/messages", Some(&token_a), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));

        let mut sent = Vec::new();
        for (token, content) in [(&token_a, "hi"), (&token_b, "hello"), (&token_a, "how are you?")]
        {
            let (status, body) = send(
                &app,
                "POST",
                "/api/messages",
                Some(token),
                Some(json!({ "chat_id": "c1", "content": content })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            sent.push(body["data"]["message_id"].as_str().unwrap().to_string());
        }
        send(
            &app,
            "POST",
            "/api/messages",
            Some(&token_b),
            Some(json!({ "chat_id": "c2", "content": "elsewhere" })),
        )
        .await;

        let (status, body) =
            send(&app, "GET", "/api/chats/c1/messages", Some(&token_b), None).await;
        assert_eq!(status, StatusCode::OK);
        let contents: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents.len(), 3);
        assert!(contents.contains(&"hi"));
        assert!(contents.contains(&"hello"));
        assert!(contents.contains(&"how are you?"));

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/messages/{}", sent[0]),
            Some(&token_a),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["content"], "hi");

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/messages/{}", sent[0]),
            Some(&token_b),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_message_requires_fields() {
        let (state, _) = test_state();
        let app = create_app(state);
        let (token, _) = register(&app, "f@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/messages",
            Some(&token),
            Some(json!({ "chat_id": "c1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "content is required");
    }

    #[tokio::test]
    async fn test_store_unavailable_is_500() {
        let (state, store) = test_state();
        let app = create_app(state);
        let (token, _) = register(&app, "down@example.com").await;

        store.set_unavailable(true);

        let (status, body) = send(&app, "GET", "/api/likes", Some(&token), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");

        let (status, _) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "down@example.com", "password": "correct horse" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
