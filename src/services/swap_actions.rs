//! Swap transition boundary
//!
//! Routes never touch swap state directly. They hand the request, the swap id
//! and the verb to [`handle_swap_action`], which forwards to whatever
//! [`SwapActionHandler`] the application state was built with, and return the
//! produced response untouched.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use std::convert::Infallible;

use crate::app::AppState;
use crate::db::{Table, TableClient};
use crate::domain::swaps::{is_terminal, SwapAction};
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestId;

/// The parts of an inbound request a swap action may look at.
#[derive(Debug, Clone)]
pub struct SwapActionRequest {
    pub request_id: String,
    pub method: Method,
    pub uri: Uri,
}

#[async_trait]
impl<S> FromRequestParts<S> for SwapActionRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequestId(request_id) = RequestId::from_request_parts(parts, state).await?;

        Ok(Self {
            request_id,
            method: parts.method.clone(),
            uri: parts.uri.clone(),
        })
    }
}

/// Applies a transition verb to a swap and produces the HTTP response.
#[async_trait]
pub trait SwapActionHandler: Send + Sync {
    async fn handle(
        &self,
        request: SwapActionRequest,
        swap_id: &str,
        action: SwapAction,
    ) -> Response;
}

/// Shared entry point for every swap action route.
pub async fn handle_swap_action(
    state: &AppState,
    request: SwapActionRequest,
    swap_id: &str,
    action: SwapAction,
) -> Response {
    tracing::info!(
        request_id = %request.request_id,
        method = %request.method,
        path = %request.uri.path(),
        swap_id = %swap_id,
        action = %action,
        "Applying swap action"
    );

    state.swap_actions.handle(request, swap_id, action).await
}

/// Default handler: moves the swap's `status` column through a [`TableClient`].
///
/// Terminal swaps reject every action, and the update only lands if the
/// status is still the one that was read.
pub struct TableSwapActions<C> {
    client: C,
}

impl<C: TableClient> TableSwapActions<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    async fn apply(&self, swap_id: &str, action: SwapAction) -> ApiResult<&'static str> {
        if swap_id.trim().is_empty() {
            return Err(ApiError::bad_request("Swap id must not be blank"));
        }

        let current = self
            .client
            .fetch_status(Table::Swaps, swap_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Swap not found"))?;

        if is_terminal(&current) {
            return Err(ApiError::conflict(format!(
                "Cannot {} a swap that is already '{}'",
                action, current
            )));
        }

        let target = action.target_status();
        let updated = self
            .client
            .update_status(Table::Swaps, swap_id, &current, target)
            .await?;

        if updated == 0 {
            // Lost the race: tell a deleted swap apart from one that moved on
            return match self.client.fetch_status(Table::Swaps, swap_id).await? {
                None => Err(ApiError::not_found("Swap not found")),
                Some(now) => Err(ApiError::conflict(format!(
                    "Swap changed from '{}' to '{}' while it was being updated",
                    current, now
                ))),
            };
        }

        tracing::debug!(swap_id = %swap_id, from = %current, to = %target, "Swap status updated");
        Ok(target)
    }
}

#[async_trait]
impl<C> SwapActionHandler for TableSwapActions<C>
where
    C: TableClient + 'static,
{
    async fn handle(
        &self,
        request: SwapActionRequest,
        swap_id: &str,
        action: SwapAction,
    ) -> Response {
        match self.apply(swap_id, action).await {
            Ok(status) => Json(serde_json::json!({ "success": true, "status": status }))
                .into_response(),
            Err(e) => e.with_request_id(request.request_id),
        }
    }
}
