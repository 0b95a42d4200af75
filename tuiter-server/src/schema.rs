//! BSON document shapes for each collection, mirroring the stored field
//! names, plus conversions into the wire types served to clients.

use mongodb::{
    bson::{self, oid::ObjectId, DateTime, Document},
    results::{DeleteResult, UpdateResult},
};
use serde::{Deserialize, Serialize};
use tuiter_common::{
    AccountType, Bookmark, DeleteStatus, Dislike, Follow, Like, Location, MaritalStatus, Message,
    NewMessage, NewTuit, NewUser, Ref, Tuit, TuitStats, UpdateStatus, UpdateTuit, UpdateUser, User,
};

use crate::error::AppError;

pub fn parse_oid(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

pub fn delete_status(result: DeleteResult) -> DeleteStatus {
    DeleteStatus {
        deleted_count: result.deleted_count,
    }
}

pub fn update_status(result: UpdateResult) -> UpdateStatus {
    UpdateStatus {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    }
}

/// `$set` document for a partial user update. Date fields are re-encoded as
/// BSON datetimes, which chrono's serde representation is not.
pub fn user_update_doc(update: &UpdateUser) -> Result<Document, bson::ser::Error> {
    let mut fields = bson::to_document(update)?;
    if let Some(dob) = update.dob {
        fields.insert("dob", DateTime::from_chrono(dob));
    }
    Ok(fields)
}

/// `$set` document for a partial tuit update.
pub fn tuit_update_doc(update: &UpdateTuit) -> Result<Document, bson::ser::Error> {
    let mut fields = bson::to_document(update)?;
    if let Some(posted_on) = update.posted_on {
        fields.insert("postedOn", DateTime::from_chrono(posted_on));
    }
    Ok(fields)
}

fn id_ref<T>(id: ObjectId) -> Ref<T> {
    Ref::Id(id.to_hex())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub marital_status: MaritalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<DateTime>,
    #[serde(default = "DateTime::now")]
    pub joined: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl From<NewUser> for UserDoc {
    fn from(user: NewUser) -> Self {
        UserDoc {
            id: None,
            username: user.username,
            password: user.password,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            profile_photo: user.profile_photo,
            header_image: user.header_image,
            account_type: user.account_type.unwrap_or_default(),
            marital_status: user.marital_status.unwrap_or_default(),
            biography: user.biography,
            dob: user.dob.map(DateTime::from_chrono),
            joined: DateTime::now(),
            location: user.location,
        }
    }
}

impl From<UserDoc> for User {
    fn from(doc: UserDoc) -> Self {
        User {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: doc.username,
            password: doc.password,
            first_name: doc.first_name,
            last_name: doc.last_name,
            email: doc.email,
            profile_photo: doc.profile_photo,
            header_image: doc.header_image,
            account_type: doc.account_type,
            marital_status: doc.marital_status,
            biography: doc.biography,
            dob: doc.dob.map(DateTime::to_chrono),
            joined: doc.joined.to_chrono(),
            location: doc.location,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuitDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub tuit: String,
    pub posted_by: ObjectId,
    #[serde(default = "DateTime::now")]
    pub posted_on: DateTime,
    #[serde(default)]
    pub stats: TuitStats,
}

impl TuitDoc {
    pub fn new(tuit: NewTuit, posted_by: ObjectId) -> Self {
        TuitDoc {
            id: None,
            tuit: tuit.tuit,
            posted_by,
            posted_on: tuit
                .posted_on
                .map(DateTime::from_chrono)
                .unwrap_or_else(DateTime::now),
            stats: TuitStats::default(),
        }
    }
}

impl From<TuitDoc> for Tuit {
    fn from(doc: TuitDoc) -> Self {
        Tuit {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            tuit: doc.tuit,
            posted_by: id_ref(doc.posted_by),
            posted_on: doc.posted_on.to_chrono(),
            stats: doc.stats,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub tuit: ObjectId,
    pub liked_by: ObjectId,
}

impl From<LikeDoc> for Like {
    fn from(doc: LikeDoc) -> Self {
        Like {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            tuit: id_ref(doc.tuit),
            liked_by: id_ref(doc.liked_by),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DislikeDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub tuit: ObjectId,
    pub disliked_by: ObjectId,
}

impl From<DislikeDoc> for Dislike {
    fn from(doc: DislikeDoc) -> Self {
        Dislike {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            tuit: id_ref(doc.tuit),
            disliked_by: id_ref(doc.disliked_by),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_following: ObjectId,
    pub user_followed: ObjectId,
}

impl From<FollowDoc> for Follow {
    fn from(doc: FollowDoc) -> Self {
        Follow {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_following: id_ref(doc.user_following),
            user_followed: id_ref(doc.user_followed),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub from: ObjectId,
    pub to: ObjectId,
    pub message: String,
    #[serde(default = "DateTime::now")]
    pub sent_on: DateTime,
}

impl MessageDoc {
    pub fn new(message: NewMessage, from: ObjectId, to: ObjectId) -> Self {
        MessageDoc {
            id: None,
            from,
            to,
            message: message.message,
            sent_on: message
                .sent_on
                .map(DateTime::from_chrono)
                .unwrap_or_else(DateTime::now),
        }
    }
}

impl From<MessageDoc> for Message {
    fn from(doc: MessageDoc) -> Self {
        Message {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            from: id_ref(doc.from),
            to: id_ref(doc.to),
            message: doc.message,
            sent_on: doc.sent_on.to_chrono(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub bookmarked_tuit: ObjectId,
    // Stored with a capital B in the original collection.
    #[serde(rename = "BookmarkedBy")]
    pub bookmarked_by: ObjectId,
}

impl From<BookmarkDoc> for Bookmark {
    fn from(doc: BookmarkDoc) -> Self {
        Bookmark {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            bookmarked_tuit: id_ref(doc.bookmarked_tuit),
            bookmarked_by: id_ref(doc.bookmarked_by),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_oid_rejects_garbage() {
        assert!(parse_oid("634a1e337b8b8f6d4c3f9b21").is_ok());
        assert!(matches!(
            parse_oid("not-an-object-id"),
            Err(AppError::InvalidId(_))
        ));
    }

    #[test]
    fn new_user_defaults_account_and_marital_status() {
        let doc = UserDoc::from(NewUser {
            username: String::from("bob"),
            password: String::from("secret"),
            ..NewUser::default()
        });
        assert_eq!(doc.account_type, AccountType::Personal);
        assert_eq!(doc.marital_status, MaritalStatus::Single);
        assert!(doc.id.is_none());
    }

    #[test]
    fn update_doc_only_names_supplied_fields() {
        let fields = user_update_doc(&UpdateUser {
            biography: Some(String::from("new bio")),
            ..UpdateUser::default()
        })
        .unwrap();
        assert_eq!(fields.get_str("biography").unwrap(), "new bio");
        assert!(fields.get("username").is_none());
        assert!(fields.get("password").is_none());
    }

    #[test]
    fn update_doc_stores_dates_as_bson_datetimes() {
        let dob = chrono::Utc::now();
        let fields = user_update_doc(&UpdateUser {
            dob: Some(dob),
            ..UpdateUser::default()
        })
        .unwrap();
        assert!(fields.get_datetime("dob").is_ok());
    }

    #[test]
    fn bookmark_doc_keeps_the_original_field_name() {
        let doc = BookmarkDoc {
            id: None,
            bookmarked_tuit: ObjectId::new(),
            bookmarked_by: ObjectId::new(),
        };
        let bson = mongodb::bson::to_document(&doc).unwrap();
        assert!(bson.contains_key("BookmarkedBy"));
        assert!(bson.contains_key("bookmarkedTuit"));
    }
}
