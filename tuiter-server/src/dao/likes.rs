use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    results::DeleteResult,
    Collection, Database,
};

use crate::schema::LikeDoc;

fn pair_filter(uid: ObjectId, tid: ObjectId) -> Document {
    doc! { "tuit": tid, "likedBy": uid }
}

#[derive(Clone)]
pub struct LikeDao {
    collection: Collection<LikeDoc>,
}

impl LikeDao {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("likes"),
        }
    }

    pub async fn find_users_that_liked(
        &self,
        tid: ObjectId,
    ) -> mongodb::error::Result<Vec<LikeDoc>> {
        self.collection
            .find(doc! { "tuit": tid })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_tuits_liked_by(
        &self,
        uid: ObjectId,
    ) -> mongodb::error::Result<Vec<LikeDoc>> {
        self.collection
            .find(doc! { "likedBy": uid })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_like(
        &self,
        uid: ObjectId,
        tid: ObjectId,
    ) -> mongodb::error::Result<Option<LikeDoc>> {
        self.collection.find_one(pair_filter(uid, tid)).await
    }

    pub async fn create(&self, uid: ObjectId, tid: ObjectId) -> mongodb::error::Result<LikeDoc> {
        let like = LikeDoc {
            id: None,
            tuit: tid,
            liked_by: uid,
        };
        let result = self.collection.insert_one(&like).await?;
        Ok(LikeDoc {
            id: result.inserted_id.as_object_id(),
            ..like
        })
    }

    pub async fn delete(
        &self,
        uid: ObjectId,
        tid: ObjectId,
    ) -> mongodb::error::Result<DeleteResult> {
        self.collection.delete_one(pair_filter(uid, tid)).await
    }

    pub async fn count_for_tuit(&self, tid: ObjectId) -> mongodb::error::Result<u64> {
        self.collection.count_documents(doc! { "tuit": tid }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_filter_names_both_sides() {
        let uid = ObjectId::new();
        let tid = ObjectId::new();
        let filter = pair_filter(uid, tid);
        assert_eq!(filter.get_object_id("likedBy").unwrap(), uid);
        assert_eq!(filter.get_object_id("tuit").unwrap(), tid);
    }
}
