use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use postbox_core_contact_contracts::{ContactSendMessageError, ContactService, DeliveryResult};

use super::internal_server_error;
use crate::models::contact::ApiContactSubmission;

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    Json(submission): Json<ApiContactSubmission>,
) -> Response {
    let result = match service.send_message(submission.into()).await {
        Err(ContactSendMessageError::Other(err)) => return internal_server_error(err),
        result => DeliveryResult::from(result),
    };

    match StatusCode::from_u16(result.status) {
        Ok(status) => (status, Json(result.info)).into_response(),
        Err(err) => internal_server_error(err),
    }
}
