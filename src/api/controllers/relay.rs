//! # Relay Controller
//!
//! Handles HTTP endpoints for relay operations, translating domain results
//! and errors into API responses.

use actix_web::{web, HttpResponse};
use log::info;

use crate::models::{ApiError, ApiResponse, DefaultAppState, RelayRequest};
use crate::repositories::EventRepositoryTrait;

pub async fn submit_relay(
    request: RelayRequest,
    state: web::ThinData<DefaultAppState>,
) -> Result<HttpResponse, ApiError> {
    let response = state.relayer.submit(request).await?;

    info!(
        "Relay accepted: request_id={} tx={}",
        response.request_id, response.transaction_hash
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

pub async fn get_relay_status(
    request_id: String,
    state: web::ThinData<DefaultAppState>,
) -> Result<HttpResponse, ApiError> {
    let event = state.event_repository.get_by_id(&request_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(event)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, web, App};

    use crate::api::routes::configure_routes;
    use crate::domain::RelaySubmitter;
    use crate::models::{AppState, TrackedEvent};
    use crate::repositories::{EventRepositoryTrait, InMemoryEventRepository, InMemoryNonceStore};
    use crate::services::{EvmProvider, NonceManager};

    fn app_state() -> (crate::models::DefaultAppState, Arc<InMemoryEventRepository>) {
        let provider =
            Arc::new(EvmProvider::new("http://localhost:8545", 1).expect("provider setup"));
        let nonce_manager = Arc::new(NonceManager::new(
            Arc::clone(&provider),
            Arc::new(InMemoryNonceStore::new()),
        ));
        let event_repository = Arc::new(InMemoryEventRepository::new());
        let relayer = Arc::new(RelaySubmitter::new(
            provider,
            nonce_manager,
            Arc::clone(&event_repository),
            "0x9fC3da866e7DF3a1c57adE1a97c9f00a70f010c3".to_string(),
            11155111,
        ));
        (
            AppState::new(relayer, Arc::clone(&event_repository)),
            event_repository,
        )
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let (state, _) = app_state();
        let app = test::init_service(
            App::new()
                .app_data(web::ThinData(state))
                .configure(configure_routes),
        )
        .await;

        let request = test::TestRequest::get().uri("/health").to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());
    }

    #[actix_web::test]
    async fn test_get_relay_status_not_found() {
        let (state, _) = app_state();
        let app = test::init_service(
            App::new()
                .app_data(web::ThinData(state))
                .configure(configure_routes),
        )
        .await;

        let request = test::TestRequest::get().uri("/relay/missing").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), 404);
    }

    #[actix_web::test]
    async fn test_get_relay_status_returns_event() {
        let (state, repository) = app_state();
        let event = repository
            .create(TrackedEvent::new("0xabc", "poll-1"))
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::ThinData(state))
                .configure(configure_routes),
        )
        .await;

        let request = test::TestRequest::get()
            .uri(&format!("/relay/{}", event.request_id))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "PENDING");
        assert_eq!(body["data"]["correlation_id"], "poll-1");
        assert_eq!(body["data"]["request_id"], event.request_id.as_str());
    }

    #[actix_web::test]
    async fn test_submit_rejects_malformed_request() {
        let (state, repository) = app_state();
        let app = test::init_service(
            App::new()
                .app_data(web::ThinData(state))
                .configure(configure_routes),
        )
        .await;

        // missing poll_id and payload
        let request = test::TestRequest::post()
            .uri("/relay")
            .set_json(serde_json::json!({ "poll_id": "", "chain_id": 11155111 }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), 400);
        assert_eq!(repository.count().await.unwrap(), 0);
    }
}
