use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tuiter_common::{DeleteStatus, Message, NewMessage};

use crate::{
    error::Result,
    schema::{delete_status, parse_oid, MessageDoc},
    state::ServerState,
};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/messages/sent/{uid}", get(find_messages_sent))
        .route("/messages/received/{uid}", get(find_messages_received))
        .route("/users/{uid}/sends/{other}", post(create_message))
        .route("/message/{mid}", delete(delete_message))
        .route(
            "/messages/{uid1}/received/{uid2}",
            get(check_messages_received_from_user),
        )
        .route(
            "/messages/{uid1}/sent/{uid2}",
            get(check_messages_sent_to_user),
        )
}

async fn find_messages_sent(
    State(state): State<Arc<ServerState>>,
    Path(from): Path<String>,
) -> Result<Json<Vec<Message>>> {
    let messages = state.messages.find_sent(parse_oid(&from)?).await?;
    Ok(Json(messages.into_iter().map(Message::from).collect()))
}

async fn find_messages_received(
    State(state): State<Arc<ServerState>>,
    Path(to): Path<String>,
) -> Result<Json<Vec<Message>>> {
    let messages = state.messages.find_received(parse_oid(&to)?).await?;
    Ok(Json(messages.into_iter().map(Message::from).collect()))
}

async fn create_message(
    State(state): State<Arc<ServerState>>,
    Path((from, to)): Path<(String, String)>,
    Json(message): Json<NewMessage>,
) -> Result<Json<Message>> {
    let created = state
        .messages
        .create(MessageDoc::new(message, parse_oid(&from)?, parse_oid(&to)?))
        .await?;
    Ok(Json(created.into()))
}

async fn delete_message(
    State(state): State<Arc<ServerState>>,
    Path(mid): Path<String>,
) -> Result<Json<DeleteStatus>> {
    let result = state.messages.delete(parse_oid(&mid)?).await?;
    Ok(Json(delete_status(result)))
}

/// Messages the first user received from the second.
async fn check_messages_received_from_user(
    State(state): State<Arc<ServerState>>,
    Path((to, from)): Path<(String, String)>,
) -> Result<Json<Vec<Message>>> {
    let messages = state
        .messages
        .find_between(parse_oid(&to)?, parse_oid(&from)?)
        .await?;
    Ok(Json(messages.into_iter().map(Message::from).collect()))
}

/// Messages the first user sent to the second.
async fn check_messages_sent_to_user(
    State(state): State<Arc<ServerState>>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<Vec<Message>>> {
    let messages = state
        .messages
        .find_between(parse_oid(&to)?, parse_oid(&from)?)
        .await?;
    Ok(Json(messages.into_iter().map(Message::from).collect()))
}
