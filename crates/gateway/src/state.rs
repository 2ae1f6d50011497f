//! Shared gateway state.

use std::sync::Arc;

use floatkit_store::WidgetStore;

pub struct AppState {
    pub store: WidgetStore,
    /// Site name substituted for `[SITE_NAME]` in message templates.
    pub site_name: String,
}

pub type SharedState = Arc<AppState>;
