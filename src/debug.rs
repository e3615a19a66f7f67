use tracing::info;

use crate::domain::response::envelope::ResponseEnvelope;
use crate::domain::response::format::JsonOptions;
use crate::domain::response::payload::Payload;
use crate::errors::ErrorRecord;

#[derive(serde::Serialize)]
struct Ping {
    ping: &'static str,
}

/// Runs only when in ENVELOPE_DEBUG_MODE
pub async fn run_debug() {
    info!("🔧 Debug mode: rendering a sample envelope...");

    let payload = Payload::from_serialize(&Ping { ping: "pong" }).unwrap_or(Payload::Null);
    let envelope = ResponseEnvelope::new()
        .with_payload(payload)
        .with_error(ErrorRecord::for_field("example", 1, 422, "sample error"));
    info!(
        status = envelope.status(),
        errors = envelope.errors().len(),
        payload = ?envelope.payload(),
        body = %envelope.to_json(JsonOptions { pretty: true }),
        "sample envelope"
    );

    info!("Debug tasks completed. Exiting...");
}
