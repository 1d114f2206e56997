//! Swap routes
//!
//! Each action route only extracts the swap id and delegates to the shared
//! transition helper. Its response is returned as produced.

use axum::{
    extract::{Path, State},
    response::Response,
};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::swaps::SwapAction;
use crate::services::swap_actions::{handle_swap_action, SwapActionRequest};

/// POST /api/swaps/:id/cancel
pub async fn cancel_swap(
    State(state): State<Arc<AppState>>,
    Path(swap_id): Path<String>,
    request: SwapActionRequest,
) -> Response {
    handle_swap_action(&state, request, &swap_id, SwapAction::Cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{state_with, RecordingActions};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn cancel_request(path: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header("x-request-id", "req-cancel")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn forwards_id_and_cancel_verb() {
        let recorder = RecordingActions::new();
        let router = crate::routes::api_router().with_state(state_with(recorder.clone()));

        let response = router
            .oneshot(cancel_request("/api/swaps/42/cancel"))
            .await
            .unwrap();

        assert_eq!(response.status(), RecordingActions::STATUS);
        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].swap_id, "42");
        assert_eq!(calls[0].action, SwapAction::Cancel);
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].request_id, "req-cancel");
    }

    #[tokio::test]
    async fn returns_collaborator_response_verbatim() {
        let recorder = RecordingActions::new();
        let router = crate::routes::api_router().with_state(state_with(recorder.clone()));

        let response = router
            .oneshot(cancel_request("/api/swaps/42/cancel"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(
            response.headers().get(RecordingActions::HEADER).unwrap(),
            "recorded"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], RecordingActions::BODY);
    }

    #[tokio::test]
    async fn id_is_passed_through_opaque() {
        let recorder = RecordingActions::new();
        let router = crate::routes::api_router().with_state(state_with(recorder.clone()));

        router
            .oneshot(cancel_request("/api/swaps/SWAP_abc.01/cancel"))
            .await
            .unwrap();

        assert_eq!(recorder.calls()[0].swap_id, "SWAP_abc.01");
    }

    #[tokio::test]
    async fn only_post_is_routed() {
        let recorder = RecordingActions::new();
        let router = crate::routes::api_router().with_state(state_with(recorder.clone()));

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/swaps/42/cancel")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(recorder.calls().is_empty());
    }
}
