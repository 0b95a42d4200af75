use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reference to another document. Serializes as the plain hex id when the
/// reference has not been expanded, and as the full document once it has.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Doc(T),
}

impl<T> Ref<T> {
    pub fn doc(&self) -> Option<&T> {
        match self {
            Ref::Id(_) => None,
            Ref::Doc(doc) => Some(doc),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    #[default]
    Personal,
    Academic,
    Professional,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaritalStatus {
    Married,
    #[default]
    Single,
    Widowed,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_photo: Option<String>,
    pub header_image: Option<String>,
    pub account_type: AccountType,
    pub marital_status: MaritalStatus,
    pub biography: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub joined: DateTime<Utc>,
    pub location: Option<Location>,
}

impl User {
    /// Copy with the password blanked, safe to return to clients.
    pub fn sanitized(mut self) -> User {
        self.password = String::new();
        self
    }

    /// Copy with the password masked, the form stored in the session at login.
    pub fn masked(mut self) -> User {
        self.password = String::from("*****");
        self
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TuitStats {
    pub replies: i64,
    pub retuits: i64,
    pub likes: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tuit {
    #[serde(rename = "_id")]
    pub id: String,
    pub tuit: String,
    pub posted_by: Ref<User>,
    pub posted_on: DateTime<Utc>,
    #[serde(default)]
    pub stats: TuitStats,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: String,
    pub tuit: Ref<Tuit>,
    pub liked_by: Ref<User>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dislike {
    #[serde(rename = "_id")]
    pub id: String,
    pub tuit: Ref<Tuit>,
    pub disliked_by: Ref<User>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_following: Ref<User>,
    pub user_followed: Ref<User>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    pub from: Ref<User>,
    pub to: Ref<User>,
    pub message: String,
    pub sent_on: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(rename = "_id")]
    pub id: String,
    pub bookmarked_tuit: Ref<Tuit>,
    // The original documents carry the capitalized field name.
    #[serde(rename = "BookmarkedBy")]
    pub bookmarked_by: Ref<User>,
}

/// Body of POST /users and POST /api/auth/signup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_photo: Option<String>,
    pub header_image: Option<String>,
    pub account_type: Option<AccountType>,
    pub marital_status: Option<MaritalStatus>,
    pub biography: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub location: Option<Location>,
}

/// Body of PUT /users/{uid}: only the named fields are replaced.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Body of PUT /tuits/{tid}.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTuit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<TuitStats>,
}

/// Body of POST /tuits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTuit {
    pub tuit: String,
    pub posted_by: String,
    pub posted_on: Option<DateTime<Utc>>,
}

/// Body of POST /users/{uid1}/sends/{uid2}.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub message: String,
    pub sent_on: Option<DateTime<Utc>>,
}

/// Body of POST /api/auth/login.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStatus {
    pub deleted_count: u64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatus {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&AccountType::Professional).unwrap(),
            "\"PROFESSIONAL\""
        );
        assert_eq!(
            serde_json::from_str::<MaritalStatus>("\"WIDOWED\"").unwrap(),
            MaritalStatus::Widowed
        );
    }

    #[test]
    fn unexpanded_ref_is_a_plain_id() {
        let follow = Follow {
            id: String::from("634a1e337b8b8f6d4c3f9b21"),
            user_following: Ref::Id(String::from("a1")),
            user_followed: Ref::Id(String::from("a2")),
        };
        let json = serde_json::to_value(&follow).unwrap();
        assert_eq!(json["userFollowing"], "a1");
        assert_eq!(json["userFollowed"], "a2");
        assert_eq!(json["_id"], "634a1e337b8b8f6d4c3f9b21");
    }

    #[test]
    fn populated_ref_round_trips_as_a_document() {
        let user = sample_user();
        let json = serde_json::to_value(Ref::Doc(user.clone())).unwrap();
        assert_eq!(json["username"], "alice");
        let back: Ref<User> = serde_json::from_value(json).unwrap();
        assert_eq!(back.doc(), Some(&user));
    }

    #[test]
    fn sanitize_and_mask_only_touch_the_password() {
        let user = sample_user();
        let sanitized = user.clone().sanitized();
        assert_eq!(sanitized.password, "");
        assert_eq!(sanitized.username, user.username);
        assert_eq!(user.clone().masked().password, "*****");
    }

    fn sample_user() -> User {
        User {
            id: String::from("634a1e337b8b8f6d4c3f9b21"),
            username: String::from("alice"),
            password: String::from("$2b$10$abcdefghijklmnopqrstuv"),
            first_name: Some(String::from("Alice")),
            last_name: None,
            email: Some(String::from("alice@tuiter.com")),
            profile_photo: None,
            header_image: None,
            account_type: AccountType::Personal,
            marital_status: MaritalStatus::Single,
            biography: None,
            dob: None,
            joined: Utc::now(),
            location: None,
        }
    }
}
