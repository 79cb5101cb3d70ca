use std::sync::Arc;

use crate::database::DocumentStore;
use crate::services::auth_service::TokenService;

/// Everything handlers share, built once at startup and handed to actix as
/// `web::Data<AppState>`. Both members are read-only after construction.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }
}
