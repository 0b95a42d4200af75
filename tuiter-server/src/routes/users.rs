use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tuiter_common::{DeleteStatus, NewUser, UpdateStatus, UpdateUser, User};

use crate::{
    error::Result,
    schema::{delete_status, parse_oid, update_status, user_update_doc},
    state::ServerState,
};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/users", get(find_all_users).post(create_user))
        .route(
            "/users/{uid}",
            get(find_user_by_id).put(update_user).delete(delete_user),
        )
}

async fn find_all_users(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<User>>> {
    let users = state.users.find_all().await?;
    Ok(Json(users.into_iter().map(User::from).collect()))
}

async fn find_user_by_id(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<Option<User>>> {
    let user = state.users.find_by_id(parse_oid(&uid)?).await?;
    Ok(Json(user.map(User::from)))
}

async fn create_user(
    State(state): State<Arc<ServerState>>,
    Json(user): Json<NewUser>,
) -> Result<Json<User>> {
    let created = state.users.create(user.into()).await?;
    Ok(Json(created.into()))
}

async fn update_user(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
    Json(update): Json<UpdateUser>,
) -> Result<Json<UpdateStatus>> {
    let result = state
        .users
        .update(parse_oid(&uid)?, user_update_doc(&update)?)
        .await?;
    Ok(Json(update_status(result)))
}

async fn delete_user(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<DeleteStatus>> {
    let result = state.users.delete(parse_oid(&uid)?).await?;
    Ok(Json(delete_status(result)))
}
