//! Tag each request with a UUID v7 in `X-Request-Id` and echo it in the response

use axum::{
    http::{HeaderValue, Request},
    Router,
};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// Ids supplied by the client are kept, so a request can be followed across services.
#[derive(Debug, Clone, Copy, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::try_from(Uuid::now_v7().to_string())
            .ok()
            .map(RequestId::new)
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, routing, Extension};
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router<()> {
        add(Router::new().route(
            "/",
            routing::get(|Extension(id): Extension<RequestId>| async move {
                id.header_value().to_str().unwrap_or_default().to_owned()
            }),
        ))
    }

    #[tokio::test]
    async fn generated() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = router().oneshot(request).await.unwrap();

        let id = response.headers()["x-request-id"].to_str().unwrap();
        assert_eq!(Uuid::parse_str(id).unwrap().get_version_num(), 7);
    }

    #[tokio::test]
    async fn supplied_by_client() {
        let request = Request::builder()
            .uri("/")
            .header("x-request-id", "frontend-42")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "frontend-42");
    }

    #[tokio::test]
    async fn unique() {
        let mut ids = Vec::new();
        for _ in 0..3 {
            let request = Request::builder().uri("/").body(Body::empty()).unwrap();
            let response = router().oneshot(request).await.unwrap();
            ids.push(response.headers()["x-request-id"].clone());
        }

        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
