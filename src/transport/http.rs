use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::broker::Broker;
use crate::utils::error::BrokerError;

/// Creates the application router.
///
/// | Method | Path              | Operation   | Success    | Failure |
/// |--------|-------------------|-------------|------------|---------|
/// | POST   | `/{topic}`        | publish     | 200        | —       |
/// | POST   | `/{topic}/{user}` | subscribe   | 200        | —       |
/// | GET    | `/{topic}/{user}` | retrieve    | 200 or 204 | 404     |
/// | DELETE | `/{topic}/{user}` | unsubscribe | 200        | 404     |
///
/// Any other path shape falls through to axum's default 404. A GET or
/// DELETE on a one-segment path is also a 404: those verbs target a
/// (topic, user) pair, so the path is malformed for them rather than the
/// method being unsupported.
pub fn create_router(broker: Arc<Broker>) -> Router {
    Router::new()
        .route("/{topic}", post(publish).fallback(reject_topic_only))
        .route(
            "/{topic}/{user}",
            post(subscribe).get(retrieve).delete(unsubscribe),
        )
        .with_state(broker)
}

/// Binds the listener and serves the relay until the task is cancelled.
pub async fn serve(addr: &str, broker: Arc<Broker>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("pollsub listening on http://{}", addr);
    axum::serve(listener, create_router(broker)).await
}

// Non-POST verbs need both a topic and a user segment.
async fn reject_topic_only() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn publish(
    State(broker): State<Arc<Broker>>,
    Path(topic): Path<String>,
    body: Bytes,
) -> StatusCode {
    broker.publish(&topic, body);
    info!("message published to {}", topic);
    StatusCode::OK
}

async fn subscribe(
    State(broker): State<Arc<Broker>>,
    Path((topic, user)): Path<(String, String)>,
) -> StatusCode {
    broker.subscribe(&topic, &user);
    info!("{} subscribed to {}", user, topic);
    StatusCode::OK
}

async fn retrieve(
    State(broker): State<Arc<Broker>>,
    Path((topic, user)): Path<(String, String)>,
) -> Result<Response, BrokerError> {
    match broker.retrieve(&topic, &user)? {
        Some(payload) => Ok(payload.into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn unsubscribe(
    State(broker): State<Arc<Broker>>,
    Path((topic, user)): Path<(String, String)>,
) -> Result<StatusCode, BrokerError> {
    broker.unsubscribe(&topic, &user)?;
    info!("{} unsubscribed from {}", user, topic);
    Ok(StatusCode::OK)
}
