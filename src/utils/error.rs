//! Error types for the broker and its HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors reported by broker operations.
///
/// Both variants describe the same situation from the caller's point of
/// view: the (topic, user) pair the request targets does not exist in the
/// required state. They map to 404 at the transport boundary. An empty poll
/// result is not an error and is modelled as `Ok(None)` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrokerError {
    #[error("topic `{0}` does not exist")]
    TopicNotFound(String),

    #[error("`{user}` is not subscribed to topic `{topic}`")]
    NotSubscribed { topic: String, user: String },
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, self.to_string()).into_response()
    }
}
