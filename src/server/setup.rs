//! `POST /api/setup`: publish the slash-command definitions.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::common::error::SetupError;
use crate::moderation;
use crate::server::AppState;

pub async fn handle_setup(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, SetupError> {
    let Ok(expected) = state.config.discord.setup_token() else {
        warn!("Setup requested but no setup token is configured");
        return Err(SetupError::Unauthorized);
    };

    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match presented {
        Some(token) if tokens_match(expected, token) => {}
        _ => {
            warn!("Rejected setup request with bad credentials");
            return Err(SetupError::Unauthorized);
        }
    }

    let count = state
        .client
        .register_commands(&moderation::definitions())
        .await?;
    info!("Registered {} commands", count);

    Ok(Json(json!({ "status": "commands registered", "count": count })))
}

fn tokens_match(expected: &str, presented: &str) -> bool {
    // Constant-time comparison
    expected.len() == presented.len()
        && expected
            .as_bytes()
            .iter()
            .zip(presented.as_bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;

    use super::*;
    use crate::discord::mock::RecordingClient;
    use crate::server::test_support::{app, body_json, config_with_public_key, send};

    fn request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::post("/api/setup");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_registers_all_commands() {
        let client = Arc::new(RecordingClient::default());
        let app = app(config_with_public_key(None), client.clone());

        let response = send(app, request(Some("Bearer maintenance-secret"))).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            body_json(response).await,
            json!({"status": "commands registered", "count": 5})
        );
        assert_eq!(
            client.calls(),
            vec![(
                "register_commands",
                "sentinel-kick,sentinel-ban,sentinel-timeout,sentinel-warn,sentinel-scan".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_bad_credentials_rejected() {
        for auth in [None, Some("Bearer wrong"), Some("maintenance-secret"), Some("Bearer ")] {
            let client = Arc::new(RecordingClient::default());
            let app = app(config_with_public_key(None), client.clone());

            let response = send(app, request(auth)).await;
            assert_eq!(response.status(), 401, "authorization {:?}", auth);
            assert!(client.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_unset_secret_rejects_everything() {
        let client = Arc::new(RecordingClient::default());
        let mut config = config_with_public_key(None);
        config.discord.setup_token = None;

        let response = send(app(config, client.clone()), request(Some("Bearer "))).await;
        assert_eq!(response.status(), 401);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_registration_failure_is_bad_gateway() {
        let client = Arc::new(RecordingClient::failing(&["register_commands"]));
        let app = app(config_with_public_key(None), client.clone());

        let response = send(app, request(Some("Bearer maintenance-secret"))).await;
        assert_eq!(response.status(), 502);
    }

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match("abc", "abc"));
        assert!(!tokens_match("abc", "abd"));
        assert!(!tokens_match("abc", "abcd"));
    }
}
