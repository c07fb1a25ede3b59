//! Shared application state handed to every handler.

use std::sync::Arc;

use cache_warden_core::Cache;
use serde_json::Value;

use crate::auth::AuthState;

/// Everything a handler needs: the cache itself, the auth signing state,
/// and the shared secret clients must present to mint a token.
pub struct AppState {
    pub cache: Cache<Value>,
    pub auth: AuthState,
    pub auth_secret: String,
}

pub type SharedState = Arc<AppState>;
