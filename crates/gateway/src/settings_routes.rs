//! Admin settings routes.

use {
    axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    serde_json::Value,
    tracing::warn,
};

use crate::state::SharedState;

/// GET handler: the stored document, or first-activation defaults when the
/// tenant has never saved.
pub async fn get_settings(
    State(state): State<SharedState>,
    Path(tenant): Path<String>,
) -> Response {
    match state.store.load(&tenant).await {
        Ok(options) => Json(options).into_response(),
        Err(error) => {
            warn!(tenant, %error, "failed to load widget settings");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        },
    }
}

/// PUT handler: sanitize and store a settings submission.
///
/// Malformed input never fails the save. Invalid scalars fall back to
/// defaults and invalid channel entries are dropped; the response body is
/// the normalized document that was actually stored.
pub async fn put_settings(
    State(state): State<SharedState>,
    Path(tenant): Path<String>,
    Json(raw): Json<Value>,
) -> Response {
    match state.store.save(&tenant, &raw).await {
        Ok(options) => Json(options).into_response(),
        Err(error) => {
            warn!(tenant, %error, "failed to save widget settings");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        },
    }
}

/// DELETE handler: the uninstall contract for one tenant. Removes the
/// settings document and the derived render cache.
pub async fn delete_settings(
    State(state): State<SharedState>,
    Path(tenant): Path<String>,
) -> Response {
    match state.store.uninstall(&tenant).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            warn!(tenant, %error, "failed to remove widget settings");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use floatkit_store::{MemoryStore, WidgetStore};

    use {super::*, crate::state::AppState};

    fn test_state() -> SharedState {
        Arc::new(AppState {
            store: WidgetStore::new(Arc::new(MemoryStore::new())),
            site_name: "Acme".into(),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn get_before_any_save_returns_defaults() {
        let state = test_state();
        let response = get_settings(State(state), Path("default".into())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["position"], "right");
        assert_eq!(body["button_size"], 60);
        assert_eq!(body["channels"], json!([]));
    }

    #[tokio::test]
    async fn malformed_put_still_succeeds_with_normalized_body() {
        let state = test_state();
        let raw = json!({
            "enabled": "1",
            "position": "sideways",
            "button_size": "banana",
            "channels": [
                { "type": "telegram", "value": "acme", "enabled": "1" },
                { "type": "sms", "value": "5550100" },
            ]
        });

        let response =
            put_settings(State(Arc::clone(&state)), Path("default".into()), Json(raw)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["position"], "right");
        assert_eq!(body["button_size"], 60);
        let channels = body["channels"].as_array().unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0]["type"], "telegram");

        // And the stored document matches what was returned.
        let stored = get_settings(State(state), Path("default".into())).await;
        assert_eq!(body_json(stored).await, body);
    }

    #[tokio::test]
    async fn delete_resets_to_defaults() {
        let state = test_state();
        put_settings(
            State(Arc::clone(&state)),
            Path("default".into()),
            Json(json!({ "enabled": "1", "position": "left" })),
        )
        .await;

        let response = delete_settings(State(Arc::clone(&state)), Path("default".into())).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let body = body_json(get_settings(State(state), Path("default".into())).await).await;
        assert_eq!(body["position"], "right");
        assert_eq!(body["enabled"], true);
    }
}
