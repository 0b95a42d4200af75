use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    results::{DeleteResult, UpdateResult},
    Collection, Database,
};

use crate::schema::UserDoc;

#[derive(Clone)]
pub struct UserDao {
    collection: Collection<UserDoc>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    pub async fn find_all(&self) -> mongodb::error::Result<Vec<UserDoc>> {
        self.collection.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, uid: ObjectId) -> mongodb::error::Result<Option<UserDoc>> {
        self.collection.find_one(doc! { "_id": uid }).await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> mongodb::error::Result<Option<UserDoc>> {
        self.collection.find_one(doc! { "username": username }).await
    }

    pub async fn create(&self, user: UserDoc) -> mongodb::error::Result<UserDoc> {
        let result = self.collection.insert_one(&user).await?;
        Ok(UserDoc {
            id: result.inserted_id.as_object_id(),
            ..user
        })
    }

    /// Applies the given fields to the user document, leaving the rest alone.
    pub async fn update(
        &self,
        uid: ObjectId,
        fields: Document,
    ) -> mongodb::error::Result<UpdateResult> {
        self.collection
            .update_one(doc! { "_id": uid }, doc! { "$set": fields })
            .await
    }

    pub async fn delete(&self, uid: ObjectId) -> mongodb::error::Result<DeleteResult> {
        self.collection.delete_one(doc! { "_id": uid }).await
    }
}
