use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    results::{DeleteResult, UpdateResult},
    Collection, Database,
};

use crate::schema::TuitDoc;

#[derive(Clone)]
pub struct TuitDao {
    collection: Collection<TuitDoc>,
}

impl TuitDao {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("tuits"),
        }
    }

    pub async fn find_all(&self) -> mongodb::error::Result<Vec<TuitDoc>> {
        self.collection.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_by_id(&self, tid: ObjectId) -> mongodb::error::Result<Option<TuitDoc>> {
        self.collection.find_one(doc! { "_id": tid }).await
    }

    pub async fn find_by_user(&self, uid: ObjectId) -> mongodb::error::Result<Vec<TuitDoc>> {
        self.collection
            .find(doc! { "postedBy": uid })
            .await?
            .try_collect()
            .await
    }

    pub async fn create(&self, tuit: TuitDoc) -> mongodb::error::Result<TuitDoc> {
        let result = self.collection.insert_one(&tuit).await?;
        Ok(TuitDoc {
            id: result.inserted_id.as_object_id(),
            ..tuit
        })
    }

    pub async fn update(
        &self,
        tid: ObjectId,
        fields: Document,
    ) -> mongodb::error::Result<UpdateResult> {
        self.collection
            .update_one(doc! { "_id": tid }, doc! { "$set": fields })
            .await
    }

    pub async fn delete(&self, tid: ObjectId) -> mongodb::error::Result<DeleteResult> {
        self.collection.delete_one(doc! { "_id": tid }).await
    }
}
