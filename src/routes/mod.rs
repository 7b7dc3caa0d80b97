//! Route modules for the VoiceLegal server

pub mod analyze;
pub mod documents;
pub mod handoff;
pub mod health;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::state::AppState;

/// Headroom above the upload limit for multipart framing
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Origin suffixes of hosted frontends (preview and production deploys)
const HOSTED_ORIGIN_SUFFIXES: &[&str] = &[".vercel.app", ".onrender.com"];

/// Whether a browser origin may call the API
pub fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    if allowed.iter().any(|o| o == origin) {
        return true;
    }
    if origin.starts_with("chrome-extension://") {
        return true;
    }
    origin
        .strip_prefix("https://")
        .map(|host| {
            HOSTED_ORIGIN_SUFFIXES
                .iter()
                .any(|suffix| host.len() > suffix.len() && host.ends_with(suffix))
        })
        .unwrap_or(false)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed = config.allowed_origins.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|origin| origin_allowed(origin, &allowed))
                .unwrap_or(false)
        }))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let body_limit = state.config().upload.max_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .merge(health::router())
        .merge(analyze::router())
        .merge(documents::router())
        .merge(handoff::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config().cors))
        .with_state(state)
}
