//! Allow cross origin requests from any frontend, including credentials

use axum::{http::Method, Router};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}
