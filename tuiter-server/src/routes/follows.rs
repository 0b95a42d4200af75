use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tuiter_common::{DeleteStatus, Follow};

use crate::{
    error::Result,
    schema::{delete_status, parse_oid},
    state::ServerState,
};

use super::user_ref;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/users/{uid}/following", get(find_following))
        .route("/users/{uid}/followers", get(find_followers))
        .route(
            "/users/{uid}/follows/{other}",
            post(user_follows_user).delete(user_unfollows_user),
        )
        .route("/users/{uid}/following/{other}", get(check_following))
        .route("/users/{uid}/follower/{other}", get(check_follower))
}

/// Accounts the user follows, with the followed side expanded.
async fn find_following(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Follow>>> {
    let docs = state.follows.find_following(parse_oid(&uid)?).await?;
    let mut follows = Vec::with_capacity(docs.len());
    for doc in docs {
        let followed = doc.user_followed;
        let mut follow = Follow::from(doc);
        follow.user_followed = user_ref(&state, followed).await?;
        follows.push(follow);
    }
    Ok(Json(follows))
}

/// Accounts following the user, with the following side expanded.
async fn find_followers(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Follow>>> {
    let docs = state.follows.find_followers(parse_oid(&uid)?).await?;
    let mut follows = Vec::with_capacity(docs.len());
    for doc in docs {
        let following = doc.user_following;
        let mut follow = Follow::from(doc);
        follow.user_following = user_ref(&state, following).await?;
        follows.push(follow);
    }
    Ok(Json(follows))
}

async fn user_follows_user(
    State(state): State<Arc<ServerState>>,
    Path((uid1, uid2)): Path<(String, String)>,
) -> Result<Json<Follow>> {
    let follow = state
        .follows
        .create(parse_oid(&uid1)?, parse_oid(&uid2)?)
        .await?;
    Ok(Json(follow.into()))
}

async fn user_unfollows_user(
    State(state): State<Arc<ServerState>>,
    Path((uid1, uid2)): Path<(String, String)>,
) -> Result<Json<DeleteStatus>> {
    let result = state
        .follows
        .delete(parse_oid(&uid1)?, parse_oid(&uid2)?)
        .await?;
    Ok(Json(delete_status(result)))
}

async fn check_following(
    State(state): State<Arc<ServerState>>,
    Path((uid1, uid2)): Path<(String, String)>,
) -> Result<Json<bool>> {
    let present = state
        .follows
        .is_following(parse_oid(&uid1)?, parse_oid(&uid2)?)
        .await?;
    Ok(Json(present))
}

async fn check_follower(
    State(state): State<Arc<ServerState>>,
    Path((uid1, uid2)): Path<(String, String)>,
) -> Result<Json<bool>> {
    let present = state
        .follows
        .is_follower(parse_oid(&uid1)?, parse_oid(&uid2)?)
        .await?;
    Ok(Json(present))
}
