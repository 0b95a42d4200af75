use std::sync::Arc;

use mongodb::Client;
use tracing::info;

use crate::{
    config::Config,
    dao::{BookmarkDao, DislikeDao, FollowDao, LikeDao, MessageDao, TuitDao, UserDao},
};

/// Everything the handlers need, built once at startup and shared by
/// reference through axum's `State`.
pub struct ServerState {
    pub config: Config,
    pub users: UserDao,
    pub tuits: TuitDao,
    pub likes: LikeDao,
    pub dislikes: DislikeDao,
    pub follows: FollowDao,
    pub messages: MessageDao,
    pub bookmarks: BookmarkDao,
}

impl ServerState {
    pub async fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let db = client.database(&config.mongo_db);
        info!("Using database {}", config.mongo_db);

        Ok(Arc::new(Self {
            users: UserDao::new(&db),
            tuits: TuitDao::new(&db),
            likes: LikeDao::new(&db),
            dislikes: DislikeDao::new(&db),
            follows: FollowDao::new(&db),
            messages: MessageDao::new(&db),
            bookmarks: BookmarkDao::new(&db),
            config,
        }))
    }
}
