//! Shared application state for all routes.

use crate::config::Profile;
use crate::flash::FlashStore;
use crate::service::SampleService;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: SampleService,
    pub flash: FlashStore,
    /// Shown on the index page.
    pub app_name: Arc<str>,
    pub profile: Profile,
}

impl FromRef<AppState> for FlashStore {
    fn from_ref(state: &AppState) -> Self {
        state.flash.clone()
    }
}
