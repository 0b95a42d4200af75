use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    results::DeleteResult,
    Collection, Database,
};

use crate::schema::FollowDoc;

fn edge_filter(following: ObjectId, followed: ObjectId) -> Document {
    doc! { "userFollowing": following, "userFollowed": followed }
}

#[derive(Clone)]
pub struct FollowDao {
    collection: Collection<FollowDoc>,
}

impl FollowDao {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("follows"),
        }
    }

    /// Users the given user follows.
    pub async fn find_following(&self, uid: ObjectId) -> mongodb::error::Result<Vec<FollowDoc>> {
        self.collection
            .find(doc! { "userFollowing": uid })
            .await?
            .try_collect()
            .await
    }

    /// Users following the given user.
    pub async fn find_followers(&self, uid: ObjectId) -> mongodb::error::Result<Vec<FollowDoc>> {
        self.collection
            .find(doc! { "userFollowed": uid })
            .await?
            .try_collect()
            .await
    }

    pub async fn create(
        &self,
        following: ObjectId,
        followed: ObjectId,
    ) -> mongodb::error::Result<FollowDoc> {
        let follow = FollowDoc {
            id: None,
            user_following: following,
            user_followed: followed,
        };
        let result = self.collection.insert_one(&follow).await?;
        Ok(FollowDoc {
            id: result.inserted_id.as_object_id(),
            ..follow
        })
    }

    pub async fn delete(
        &self,
        following: ObjectId,
        followed: ObjectId,
    ) -> mongodb::error::Result<DeleteResult> {
        self.collection
            .delete_one(edge_filter(following, followed))
            .await
    }

    /// Whether uid2 appears in uid1's following list.
    pub async fn is_following(
        &self,
        uid1: ObjectId,
        uid2: ObjectId,
    ) -> mongodb::error::Result<bool> {
        let count = self
            .collection
            .count_documents(edge_filter(uid1, uid2))
            .await?;
        Ok(count > 0)
    }

    /// Whether uid2 appears in uid1's followers list.
    pub async fn is_follower(
        &self,
        uid1: ObjectId,
        uid2: ObjectId,
    ) -> mongodb::error::Result<bool> {
        let count = self
            .collection
            .count_documents(edge_filter(uid2, uid1))
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_filter_is_directed() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        let filter = edge_filter(a, b);
        assert_eq!(filter.get_object_id("userFollowing").unwrap(), a);
        assert_eq!(filter.get_object_id("userFollowed").unwrap(), b);
    }
}
