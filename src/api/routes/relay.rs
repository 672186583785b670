//! This module defines the HTTP routes for relay operations: submitting a
//! gas-sponsored transaction and polling the status of its tracked event.

use actix_web::{get, post, web, Responder};

use crate::api::controllers::relay;
use crate::models::{DefaultAppState, RelayRequest};

/// Submits a relay request. Returns synchronously once the transaction has
/// been handed to the ledger; confirmation progress is observable through
/// the status endpoint.
#[post("/relay")]
pub async fn submit_relay(
    request: web::Json<RelayRequest>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    relay::submit_relay(request.into_inner(), data).await
}

/// Returns the tracked event for a relayed transaction.
#[get("/relay/{request_id}")]
pub async fn get_relay_status(
    request_id: web::Path<String>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    relay::get_relay_status(request_id.into_inner(), data).await
}
