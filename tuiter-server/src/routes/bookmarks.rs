use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tuiter_common::{Bookmark, DeleteStatus};

use crate::{
    error::Result,
    schema::{delete_status, parse_oid},
    state::ServerState,
};

use super::tuit_ref;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route(
            "/users/{uid}/bookmarks",
            get(find_tuits_bookmarked_by_user).delete(delete_all_bookmarks_for_user),
        )
        .route(
            "/users/{uid}/bookmarks/{tid}",
            get(check_tuit_bookmarked_by_user).post(user_bookmarks_tuit),
        )
        .route("/users/{uid}/unbookmarks/{tid}", delete(user_unbookmarks_tuit))
}

async fn find_tuits_bookmarked_by_user(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Bookmark>>> {
    let docs = state.bookmarks.find_bookmarks_of(parse_oid(&uid)?).await?;
    let mut bookmarks = Vec::with_capacity(docs.len());
    for doc in docs {
        let tuit = doc.bookmarked_tuit;
        let mut bookmark = Bookmark::from(doc);
        bookmark.bookmarked_tuit = tuit_ref(&state, tuit).await?;
        bookmarks.push(bookmark);
    }
    Ok(Json(bookmarks))
}

async fn check_tuit_bookmarked_by_user(
    State(state): State<Arc<ServerState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<bool>> {
    let present = state
        .bookmarks
        .exists(parse_oid(&uid)?, parse_oid(&tid)?)
        .await?;
    Ok(Json(present))
}

async fn user_bookmarks_tuit(
    State(state): State<Arc<ServerState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<Bookmark>> {
    let bookmark = state
        .bookmarks
        .create(parse_oid(&uid)?, parse_oid(&tid)?)
        .await?;
    Ok(Json(bookmark.into()))
}

async fn user_unbookmarks_tuit(
    State(state): State<Arc<ServerState>>,
    Path((uid, tid)): Path<(String, String)>,
) -> Result<Json<DeleteStatus>> {
    let result = state
        .bookmarks
        .delete(parse_oid(&uid)?, parse_oid(&tid)?)
        .await?;
    Ok(Json(delete_status(result)))
}

async fn delete_all_bookmarks_for_user(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<DeleteStatus>> {
    let result = state
        .bookmarks
        .delete_all_for_user(parse_oid(&uid)?)
        .await?;
    Ok(Json(delete_status(result)))
}
