//! HTTP surface. One module per resource; each handler calls exactly one DAO
//! operation and expands document references before serializing.

pub mod auth;
mod bookmarks;
mod dislikes;
mod follows;
mod likes;
mod messages;
mod tuits;
mod users;

use std::sync::Arc;

use axum::{routing::get, Router};
use mongodb::bson::oid::ObjectId;
use tuiter_common::{Ref, Tuit, User};

use crate::{error::Result, state::ServerState};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/hello", get(hello))
        .merge(users::router())
        .merge(tuits::router())
        .merge(likes::router())
        .merge(dislikes::router())
        .merge(follows::router())
        .merge(messages::router())
        .merge(bookmarks::router())
        .merge(auth::router())
}

async fn hello() -> &'static str {
    "Hello World!"
}

/// Expands a user reference. A dangling reference stays a plain id, the way
/// an unpopulated mongoose ref would.
pub(crate) async fn user_ref(state: &ServerState, id: ObjectId) -> Result<Ref<User>> {
    Ok(match state.users.find_by_id(id).await? {
        Some(doc) => Ref::Doc(doc.into()),
        None => Ref::Id(id.to_hex()),
    })
}

/// Expands a tuit reference, including its author.
pub(crate) async fn tuit_ref(state: &ServerState, id: ObjectId) -> Result<Ref<Tuit>> {
    Ok(match state.tuits.find_by_id(id).await? {
        Some(doc) => {
            let posted_by = doc.posted_by;
            let mut tuit = Tuit::from(doc);
            tuit.posted_by = user_ref(state, posted_by).await?;
            Ref::Doc(tuit)
        }
        None => Ref::Id(id.to_hex()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    use crate::config::Config;

    // The driver connects lazily, so building the full app needs no running
    // store; these tests only exercise paths that never reach a collection.
    async fn test_app() -> Router {
        let config = Config {
            port: 0,
            mongo_uri: String::from("mongodb://localhost:27017"),
            mongo_db: String::from("tuiter-test"),
            production: false,
        };
        let state = ServerState::new(config).await.unwrap();
        router()
            .layer(SessionManagerLayer::new(MemoryStore::default()))
            .with_state(state)
    }

    #[tokio::test]
    async fn hello_greets() {
        let response = test_app()
            .await
            .oneshot(Request::builder().uri("/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Hello World!");
    }

    #[tokio::test]
    async fn profile_without_a_session_is_forbidden() {
        let response = test_app()
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn logout_succeeds_without_a_session() {
        let response = test_app()
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_object_ids_are_rejected() {
        let response = test_app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/users/not-an-object-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
