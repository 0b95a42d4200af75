use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tuiter_common::{DeleteStatus, NewTuit, Tuit, UpdateStatus, UpdateTuit};

use crate::{
    error::Result,
    schema::{delete_status, parse_oid, tuit_update_doc, update_status, TuitDoc},
    state::ServerState,
};

use super::user_ref;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/tuits", get(find_all_tuits).post(create_tuit))
        .route(
            "/tuits/{tid}",
            get(find_tuit_by_id).put(update_tuit).delete(delete_tuit),
        )
        .route("/users/{uid}/tuits", get(find_tuits_by_user))
}

async fn populate(state: &ServerState, docs: Vec<TuitDoc>) -> Result<Vec<Tuit>> {
    let mut tuits = Vec::with_capacity(docs.len());
    for doc in docs {
        let posted_by = doc.posted_by;
        let mut tuit = Tuit::from(doc);
        tuit.posted_by = user_ref(state, posted_by).await?;
        tuits.push(tuit);
    }
    Ok(tuits)
}

async fn find_all_tuits(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<Tuit>>> {
    let tuits = state.tuits.find_all().await?;
    Ok(Json(populate(&state, tuits).await?))
}

async fn find_tuit_by_id(
    State(state): State<Arc<ServerState>>,
    Path(tid): Path<String>,
) -> Result<Json<Option<Tuit>>> {
    match state.tuits.find_by_id(parse_oid(&tid)?).await? {
        Some(doc) => {
            let tuit = populate(&state, vec![doc]).await?.pop();
            Ok(Json(tuit))
        }
        None => Ok(Json(None)),
    }
}

async fn find_tuits_by_user(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Tuit>>> {
    let tuits = state.tuits.find_by_user(parse_oid(&uid)?).await?;
    Ok(Json(populate(&state, tuits).await?))
}

async fn create_tuit(
    State(state): State<Arc<ServerState>>,
    Json(tuit): Json<NewTuit>,
) -> Result<Json<Tuit>> {
    let posted_by = parse_oid(&tuit.posted_by)?;
    let created = state.tuits.create(TuitDoc::new(tuit, posted_by)).await?;
    Ok(Json(created.into()))
}

async fn update_tuit(
    State(state): State<Arc<ServerState>>,
    Path(tid): Path<String>,
    Json(update): Json<UpdateTuit>,
) -> Result<Json<UpdateStatus>> {
    let result = state
        .tuits
        .update(parse_oid(&tid)?, tuit_update_doc(&update)?)
        .await?;
    Ok(Json(update_status(result)))
}

async fn delete_tuit(
    State(state): State<Arc<ServerState>>,
    Path(tid): Path<String>,
) -> Result<Json<DeleteStatus>> {
    let result = state.tuits.delete(parse_oid(&tid)?).await?;
    Ok(Json(delete_status(result)))
}
