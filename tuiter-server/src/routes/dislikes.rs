use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tuiter_common::{DeleteStatus, Dislike};

use crate::{
    error::Result,
    schema::{delete_status, parse_oid},
    state::ServerState,
};

use super::{tuit_ref, user_ref};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/tuits/{tid}/dislikes", get(find_users_that_disliked_tuit))
        .route("/tuits/{tid}/dislikes/count", get(count_dislikes_for_tuit))
        .route("/users/{uid}/dislikes", get(find_tuits_disliked_by_user))
        .route(
            "/users/{uid}/dislikes/{tid}",
            get(find_user_dislikes_tuit).post(user_dislikes_tuit),
        )
        .route("/users/{uid}/undislikes/{tid}", delete(user_undislikes_tuit))
}

async fn find_users_that_disliked_tuit(
    State(state): State<Arc<ServerState>>,
    Path(tid): Path<String>,
) -> Result<Json<Vec<Dislike>>> {
    let docs = state
        .dislikes
        .find_users_that_disliked(parse_oid(&tid)?)
        .await?;
    let mut dislikes = Vec::with_capacity(docs.len());
    for doc in docs {
        let disliked_by = doc.disliked_by;
        let mut dislike = Dislike::from(doc);
        dislike.disliked_by = user_ref(&state, disliked_by).await?;
        dislikes.push(dislike);
    }
    Ok(Json(dislikes))
}

async fn find_tuits_disliked_by_user(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Dislike>>> {
    let docs = state
        .dislikes
        .find_tuits_disliked_by(parse_oid(&uid)?)
        .await?;
    let mut dislikes = Vec::with_capacity(docs.len());
    for doc in docs {
        let tuit = doc.tuit;
        let mut dislike = Dislike::from(doc);
        dislike.tuit = tuit_ref(&state, tuit).await?;
        dislikes.push(dislike);
    }
    Ok(Json(dislikes))
}

async fn find_user_dislikes_tuit(
    State(state): State<Arc<ServerState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Option<Dislike>>> {
    let dislike = state
        .dislikes
        .find_dislike(parse_oid(&uid)?, parse_oid(&tid)?)
        .await?;
    Ok(Json(dislike.map(Dislike::from)))
}

async fn count_dislikes_for_tuit(
    State(state): State<Arc<ServerState>>,
    Path(tid): Path<String>,
) -> Result<Json<u64>> {
    let count = state.dislikes.count_for_tuit(parse_oid(&tid)?).await?;
    Ok(Json(count))
}

async fn user_dislikes_tuit(
    State(state): State<Arc<ServerState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Dislike>> {
    let dislike = state
        .dislikes
        .create(parse_oid(&uid)?, parse_oid(&tid)?)
        .await?;
    Ok(Json(dislike.into()))
}

async fn user_undislikes_tuit(
    State(state): State<Arc<ServerState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<DeleteStatus>> {
    let result = state
        .dislikes
        .delete(parse_oid(&uid)?, parse_oid(&tid)?)
        .await?;
    Ok(Json(delete_status(result)))
}
