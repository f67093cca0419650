//! Chat flow: resolve origin, retrieve a shortlist, ask the model, fall back
//! to the canned itinerary on any provider failure.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use ai_client::CompletionAgent;
use harbourguide_catalog::{resolve_origin, retrieve, RetrieveParams};
use harbourguide_common::{PlaceView, Pool};

use crate::fallback::fallback_itinerary;
use crate::prompt::{build_context, build_prompt};
use crate::AppState;

pub const EMPTY_REPLY: &str = "I couldn't generate a response. Please try again.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub user_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub user_lon: Option<f64>,
    pub view_mode: Option<String>,
}

/// Browser clients send coordinates as numbers or numeric strings. Anything
/// that does not parse to a finite number is treated as absent.
fn lenient_coord<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let coord = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(coord.filter(|v| v.is_finite()))
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub retrieved: Vec<PlaceView>,
}

/// Shortlist of places relevant to `message` from the requested pool.
pub fn retrieve_for(
    state: &AppState,
    message: &str,
    user_lat: Option<f64>,
    user_lon: Option<f64>,
    pool: Pool,
) -> Vec<PlaceView> {
    let origin = resolve_origin(&state.gazetteer, message, user_lat, user_lon);
    retrieve(
        state.catalog.pool(pool),
        message,
        origin.as_ref(),
        RetrieveParams::default(),
    )
}

/// Answer one chat message. Never fails: provider errors become the fallback.
pub async fn answer(
    state: &AppState,
    message: &str,
    user_lat: Option<f64>,
    user_lon: Option<f64>,
    view_mode: Option<&str>,
) -> ChatReply {
    let pool = Pool::from_view_mode(view_mode);
    let retrieved = retrieve_for(state, message, user_lat, user_lon, pool);
    info!(count = retrieved.len(), %pool, "Retrieved items");

    let prompt = build_prompt(&build_context(&retrieved), message);
    let reply = complete_or_fallback(state.assistant.as_deref(), &prompt).await;

    ChatReply {
        reply: if reply.is_empty() {
            EMPTY_REPLY.to_string()
        } else {
            reply
        },
        retrieved,
    }
}

async fn complete_or_fallback(assistant: Option<&dyn CompletionAgent>, prompt: &str) -> String {
    let Some(assistant) = assistant else {
        warn!("No AI provider configured, using fallback reply");
        return fallback_itinerary(prompt);
    };

    match assistant.complete(prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "AI completion failed, using fallback reply");
            fallback_itinerary(prompt)
        }
    }
}
