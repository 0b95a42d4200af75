//! Data access objects, one per collection. Each operation issues exactly one
//! query against its own collection; reference expansion happens in the route
//! layer.

mod bookmarks;
mod dislikes;
mod follows;
mod likes;
mod messages;
mod tuits;
mod users;

pub use bookmarks::BookmarkDao;
pub use dislikes::DislikeDao;
pub use follows::FollowDao;
pub use likes::LikeDao;
pub use messages::MessageDao;
pub use tuits::TuitDao;
pub use users::UserDao;
