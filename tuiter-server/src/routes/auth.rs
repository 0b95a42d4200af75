//! Session-backed authentication gate. A session is either anonymous or
//! authenticated; the authenticated profile lives server-side under the
//! `profile` key with the password never stored in the clear.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tower_sessions::Session;
use tuiter_common::{Credentials, NewUser, User};

use crate::{
    error::{AppError, Result},
    state::ServerState,
};

const PROFILE_KEY: &str = "profile";
const SALT_ROUNDS: u32 = 10;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/profile", post(profile))
        .route("/api/auth/logout", post(logout))
}

async fn signup(
    State(state): State<Arc<ServerState>>,
    session: Session,
    Json(mut new_user): Json<NewUser>,
) -> Result<Json<User>> {
    if state
        .users
        .find_by_username(&new_user.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(new_user.username));
    }
    new_user.password = bcrypt::hash(&new_user.password, SALT_ROUNDS)?;
    let inserted = state.users.create(new_user.into()).await?;
    let user = User::from(inserted).sanitized();
    session.insert(PROFILE_KEY, &user).await?;
    Ok(Json(user))
}

async fn login(
    State(state): State<Arc<ServerState>>,
    session: Session,
    Json(credentials): Json<Credentials>,
) -> Result<Json<User>> {
    let Some(existing) = state.users.find_by_username(&credentials.username).await? else {
        return Err(AppError::Forbidden);
    };
    if !bcrypt::verify(&credentials.password, &existing.password)? {
        return Err(AppError::Forbidden);
    }
    let user = User::from(existing).masked();
    session.insert(PROFILE_KEY, &user).await?;
    Ok(Json(user))
}

async fn profile(session: Session) -> Result<Json<User>> {
    match session.get::<User>(PROFILE_KEY).await? {
        Some(user) => Ok(Json(user.sanitized())),
        None => Err(AppError::Forbidden),
    }
}

async fn logout(session: Session) -> Result<StatusCode> {
    session.flush().await?;
    Ok(StatusCode::OK)
}
