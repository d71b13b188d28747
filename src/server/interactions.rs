//! Interaction webhook: verify, route by type, run the command, reply.
//!
//! Once a request is authenticated every outcome is an HTTP 200 with an
//! interaction response; Discord treats anything else as a broken endpoint.

use std::fmt::Display;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::{debug, warn};

use crate::common::error::DispatchError;
use crate::common::{Interaction, InteractionResponse, InteractionType};
use crate::discord::verify::{verify_request, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::server::AppState;

pub const UNSUPPORTED_MESSAGE: &str =
    "Unsupported interaction type. Use `/sentinel-*` commands to moderate your server.";

pub const FAILURE_PREFIX: &str = "⚠️ Moderation action failed:";

const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// `POST /api/interactions`
pub async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, DispatchError> {
    let public_key = state.config.discord.public_key()?;

    let (Some(signature), Some(timestamp)) = (
        header(&headers, SIGNATURE_HEADER),
        header(&headers, TIMESTAMP_HEADER),
    ) else {
        return Err(DispatchError::Authentication {
            reason: "missing signature headers",
        });
    };

    // Nothing touches the body before this check.
    if !verify_request(&body, signature, timestamp, public_key) {
        return Err(DispatchError::Authentication {
            reason: "signature mismatch",
        });
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(e) => {
            warn!("Verified interaction body is not valid JSON: {}", e);
            return Ok(Json(InteractionResponse::ephemeral(UNSUPPORTED_MESSAGE)));
        }
    };

    Ok(Json(dispatch(&state, interaction).await))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Route a verified interaction to its response.
pub async fn dispatch(state: &AppState, interaction: Interaction) -> InteractionResponse {
    match interaction.kind {
        InteractionType::Handshake => {
            debug!("Answering handshake");
            InteractionResponse::pong()
        }
        InteractionType::ApplicationCommand if interaction.data.is_some() => {
            run_command(state, interaction).await
        }
        other => {
            debug!("Unsupported interaction {:?}", other);
            InteractionResponse::ephemeral(UNSUPPORTED_MESSAGE)
        }
    }
}

async fn run_command(state: &AppState, interaction: Interaction) -> InteractionResponse {
    let name = interaction
        .data
        .as_ref()
        .map(|d| d.name.clone())
        .unwrap_or_default();

    match state.executor.perform(&name, &interaction).await {
        Ok(result) => {
            let response = InteractionResponse::ephemeral(result.message.as_str());
            if result.notify_channel {
                state.notifier.spawn_broadcast(interaction, result.message);
            }
            response
        }
        Err(e) => {
            warn!(command = %name, "Moderation command failed: {}", e);
            InteractionResponse::ephemeral(failure_message(&e))
        }
    }
}

/// In-band text for a failed command.
pub fn failure_message(error: &impl Display) -> String {
    let detail = error.to_string();
    let detail = match detail.trim() {
        "" => UNKNOWN_ERROR,
        trimmed => trimmed,
    };
    format!("{} {}", FAILURE_PREFIX, detail)
}
