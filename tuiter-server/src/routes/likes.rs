use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tuiter_common::{DeleteStatus, Like};

use crate::{
    error::Result,
    schema::{delete_status, parse_oid},
    state::ServerState,
};

use super::{tuit_ref, user_ref};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/tuits/{tid}/likes", get(find_users_that_liked_tuit))
        .route("/tuits/{tid}/likes/count", get(count_likes_for_tuit))
        .route("/users/{uid}/likes", get(find_tuits_liked_by_user))
        .route(
            "/users/{uid}/likes/{tid}",
            get(find_user_likes_tuit).post(user_likes_tuit),
        )
        .route("/users/{uid}/unlikes/{tid}", delete(user_unlikes_tuit))
}

async fn find_users_that_liked_tuit(
    State(state): State<Arc<ServerState>>,
    Path(tid): Path<String>,
) -> Result<Json<Vec<Like>>> {
    let docs = state.likes.find_users_that_liked(parse_oid(&tid)?).await?;
    let mut likes = Vec::with_capacity(docs.len());
    for doc in docs {
        let liked_by = doc.liked_by;
        let mut like = Like::from(doc);
        like.liked_by = user_ref(&state, liked_by).await?;
        likes.push(like);
    }
    Ok(Json(likes))
}

async fn find_tuits_liked_by_user(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Like>>> {
    let docs = state.likes.find_tuits_liked_by(parse_oid(&uid)?).await?;
    let mut likes = Vec::with_capacity(docs.len());
    for doc in docs {
        let tuit = doc.tuit;
        let mut like = Like::from(doc);
        like.tuit = tuit_ref(&state, tuit).await?;
        likes.push(like);
    }
    Ok(Json(likes))
}

async fn find_user_likes_tuit(
    State(state): State<Arc<ServerState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Option<Like>>> {
    let like = state
        .likes
        .find_like(parse_oid(&uid)?, parse_oid(&tid)?)
        .await?;
    Ok(Json(like.map(Like::from)))
}

async fn count_likes_for_tuit(
    State(state): State<Arc<ServerState>>,
    Path(tid): Path<String>,
) -> Result<Json<u64>> {
    let count = state.likes.count_for_tuit(parse_oid(&tid)?).await?;
    Ok(Json(count))
}

async fn user_likes_tuit(
    State(state): State<Arc<ServerState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Like>> {
    let like = state
        .likes
        .create(parse_oid(&uid)?, parse_oid(&tid)?)
        .await?;
    Ok(Json(like.into()))
}

async fn user_unlikes_tuit(
    State(state): State<Arc<ServerState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<DeleteStatus>> {
    let result = state
        .likes
        .delete(parse_oid(&uid)?, parse_oid(&tid)?)
        .await?;
    Ok(Json(delete_status(result)))
}
