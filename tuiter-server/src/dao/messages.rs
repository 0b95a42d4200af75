use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    results::DeleteResult,
    Collection, Database,
};

use crate::schema::MessageDoc;

#[derive(Clone)]
pub struct MessageDao {
    collection: Collection<MessageDoc>,
}

impl MessageDao {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("messages"),
        }
    }

    pub async fn create(&self, message: MessageDoc) -> mongodb::error::Result<MessageDoc> {
        let result = self.collection.insert_one(&message).await?;
        Ok(MessageDoc {
            id: result.inserted_id.as_object_id(),
            ..message
        })
    }

    pub async fn delete(&self, mid: ObjectId) -> mongodb::error::Result<DeleteResult> {
        self.collection.delete_one(doc! { "_id": mid }).await
    }

    pub async fn find_sent(&self, from: ObjectId) -> mongodb::error::Result<Vec<MessageDoc>> {
        self.collection
            .find(doc! { "from": from })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_received(&self, to: ObjectId) -> mongodb::error::Result<Vec<MessageDoc>> {
        self.collection
            .find(doc! { "to": to })
            .await?
            .try_collect()
            .await
    }

    /// Messages from one specific user to another.
    pub async fn find_between(
        &self,
        to: ObjectId,
        from: ObjectId,
    ) -> mongodb::error::Result<Vec<MessageDoc>> {
        self.collection
            .find(doc! { "to": to, "from": from })
            .await?
            .try_collect()
            .await
    }
}
