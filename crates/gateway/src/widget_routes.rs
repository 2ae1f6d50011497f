//! Public widget routes: the rendered snippet and the embed loader script.

use {
    axum::{
        extract::{Path, Query, State},
        http::{StatusCode, header},
        response::{Html, IntoResponse, Response},
    },
    serde::Deserialize,
    tracing::warn,
};

use floatkit_widget::{Device, PageContext};

use crate::{render, state::SharedState};

/// Page context supplied by the embedding page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Optional `mobile`/`desktop` filter; when present, channels are
    /// gated server-side instead of with media-query classes.
    #[serde(default)]
    pub device: String,
}

/// GET handler: the rendered widget snippet for one tenant.
///
/// A disabled widget renders an empty body, not an error. Renders without
/// page context are served from (and refill) the per-tenant cache; a
/// context-bearing or device-filtered render bypasses it since its output
/// differs per page.
pub async fn widget_html(
    State(state): State<SharedState>,
    Path(tenant): Path<String>,
    Query(page): Query<PageQuery>,
) -> Response {
    let device = Device::parse(&page.device);
    let static_context = page.url.is_empty() && page.title.is_empty() && device.is_none();

    if static_context {
        match state.store.cached_render(&tenant).await {
            Ok(Some(cached)) => return Html(cached).into_response(),
            Ok(None) => {},
            Err(error) => warn!(tenant, %error, "render cache read failed"),
        }
    }

    let options = match state.store.load(&tenant).await {
        Ok(options) => options,
        Err(error) => {
            warn!(tenant, %error, "failed to load widget settings");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        },
    };

    let ctx = PageContext {
        url: page.url,
        title: page.title,
        site_name: state.site_name.clone(),
    };
    let html = match render::render_widget(&options, &ctx, device) {
        Ok(html) => html,
        Err(error) => {
            warn!(tenant, %error, "widget template render failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        },
    };

    // Conditional write: a save that landed after `load` must keep its
    // cache invalidation; the store re-checks the document before caching.
    if static_context
        && let Err(error) = state
            .store
            .store_render_if_current(&tenant, &html, &options)
            .await
    {
        warn!(tenant, %error, "render cache write failed");
    }

    Html(html).into_response()
}

/// Loader script host pages include with a single `<script src=...>` tag.
/// Fetches the rendered snippet with the page's own URL and title, injects
/// it, and re-activates the inline toggle script (scripts inserted through
/// `innerHTML` do not run on their own).
const EMBED_JS: &str = r#"(function () {
  var script = document.currentScript;
  if (!script || !script.src) return;
  var base = script.src.replace(/\/embed\.js(\?.*)?$/, "");
  var src = base
    + "?url=" + encodeURIComponent(window.location.href)
    + "&title=" + encodeURIComponent(document.title);
  fetch(src)
    .then(function (response) { return response.text(); })
    .then(function (html) {
      if (!html) return;
      var mount = document.createElement("div");
      mount.innerHTML = html;
      document.body.appendChild(mount);
      mount.querySelectorAll("script").forEach(function (inert) {
        var live = document.createElement("script");
        live.textContent = inert.textContent;
        inert.parentNode.replaceChild(live, inert);
      });
    });
})();
"#;

/// GET handler for the embed loader.
pub async fn embed_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        EMBED_JS,
    )
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

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn get_widget(state: &SharedState, page: PageQuery) -> String {
        let response = widget_html(
            State(Arc::clone(state)),
            Path("default".into()),
            Query(page),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_text(response).await
    }

    #[tokio::test]
    async fn disabled_widget_serves_empty_body() {
        let state = test_state();
        state
            .store
            .save("default", &json!({ "enabled": false }))
            .await
            .unwrap();
        let body = get_widget(&state, PageQuery::default()).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn page_context_flows_into_links() {
        let state = test_state();
        state
            .store
            .save(
                "default",
                &json!({
                    "enabled": "1",
                    "channels": [{
                        "type": "whatsapp",
                        "value": "+1 555 0100",
                        "message": "Hi from [PAGE_TITLE]",
                        "enabled": "1",
                        "show_on_mobile": "1",
                        "show_on_desktop": "1",
                    }]
                }),
            )
            .await
            .unwrap();

        let body = get_widget(
            &state,
            PageQuery {
                url: "https://acme.test/pricing".into(),
                title: "Pricing".into(),
                ..PageQuery::default()
            },
        )
        .await;
        assert!(body.contains("https://wa.me/15550100?text=Hi%20from%20Pricing"));
    }

    #[tokio::test]
    async fn device_query_filters_server_side() {
        let state = test_state();
        state
            .store
            .save(
                "default",
                &json!({
                    "enabled": "1",
                    "show_on_mobile": "1",
                    "show_on_desktop": "1",
                    "channels": [
                        {
                            "type": "phone",
                            "value": "+15550100",
                            "enabled": "1",
                            "show_on_mobile": "1",
                            "show_on_desktop": "1",
                        },
                        {
                            "type": "email",
                            "value": "hi@acme.test",
                            "enabled": "1",
                            "show_on_desktop": "1",
                        },
                    ]
                }),
            )
            .await
            .unwrap();

        let mobile = get_widget(
            &state,
            PageQuery {
                device: "mobile".into(),
                ..PageQuery::default()
            },
        )
        .await;
        assert!(mobile.contains("tel:+15550100"));
        assert!(!mobile.contains("mailto:"));
        // Device-filtered renders never refill the static cache.
        assert!(state.store.cached_render("default").await.unwrap().is_none());

        let desktop = get_widget(
            &state,
            PageQuery {
                device: "desktop".into(),
                ..PageQuery::default()
            },
        )
        .await;
        assert!(desktop.contains("tel:+15550100"));
        assert!(desktop.contains("mailto:hi@acme.test"));
    }

    #[tokio::test]
    async fn static_renders_are_cached_until_next_save() {
        let state = test_state();
        state
            .store
            .save(
                "default",
                &json!({
                    "enabled": "1",
                    "channels": [{ "type": "telegram", "value": "acme", "enabled": "1" }]
                }),
            )
            .await
            .unwrap();

        let first = get_widget(&state, PageQuery::default()).await;
        assert!(first.contains("https://t.me/acme"));
        assert_eq!(
            state.store.cached_render("default").await.unwrap().as_deref(),
            Some(first.as_str())
        );

        // A save drops the cache; the next render reflects the new document.
        state
            .store
            .save(
                "default",
                &json!({
                    "enabled": "1",
                    "channels": [{ "type": "telegram", "value": "acme_support", "enabled": "1" }]
                }),
            )
            .await
            .unwrap();
        assert!(state.store.cached_render("default").await.unwrap().is_none());
        let second = get_widget(&state, PageQuery::default()).await;
        assert!(second.contains("https://t.me/acme_support"));
    }

    #[tokio::test]
    async fn embed_script_served_as_javascript() {
        let response = embed_js().await.into_response();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/javascript; charset=utf-8"
        );
        let body = body_text(response).await;
        assert!(body.contains("embed.js"));
    }
}
