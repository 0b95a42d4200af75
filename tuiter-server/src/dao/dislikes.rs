use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    results::DeleteResult,
    Collection, Database,
};

use crate::schema::DislikeDoc;

fn pair_filter(uid: ObjectId, tid: ObjectId) -> Document {
    doc! { "tuit": tid, "dislikedBy": uid }
}

#[derive(Clone)]
pub struct DislikeDao {
    collection: Collection<DislikeDoc>,
}

impl DislikeDao {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("dislikes"),
        }
    }

    pub async fn find_users_that_disliked(
        &self,
        tid: ObjectId,
    ) -> mongodb::error::Result<Vec<DislikeDoc>> {
        self.collection
            .find(doc! { "tuit": tid })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_tuits_disliked_by(
        &self,
        uid: ObjectId,
    ) -> mongodb::error::Result<Vec<DislikeDoc>> {
        self.collection
            .find(doc! { "dislikedBy": uid })
            .await?
            .try_collect()
            .await
    }

    pub async fn find_dislike(
        &self,
        uid: ObjectId,
        tid: ObjectId,
    ) -> mongodb::error::Result<Option<DislikeDoc>> {
        self.collection.find_one(pair_filter(uid, tid)).await
    }

    pub async fn create(
        &self,
        uid: ObjectId,
        tid: ObjectId,
    ) -> mongodb::error::Result<DislikeDoc> {
        let dislike = DislikeDoc {
            id: None,
            tuit: tid,
            disliked_by: uid,
        };
        let result = self.collection.insert_one(&dislike).await?;
        Ok(DislikeDoc {
            id: result.inserted_id.as_object_id(),
            ..dislike
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
    fn pair_filter_uses_the_dislike_field() {
        let uid = ObjectId::new();
        let tid = ObjectId::new();
        let filter = pair_filter(uid, tid);
        assert_eq!(filter.get_object_id("dislikedBy").unwrap(), uid);
        assert!(filter.get("likedBy").is_none());
    }
}
