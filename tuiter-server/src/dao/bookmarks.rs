use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    results::DeleteResult,
    Collection, Database,
};

use crate::schema::BookmarkDoc;

fn pair_filter(uid: ObjectId, tid: ObjectId) -> Document {
    doc! { "bookmarkedTuit": tid, "BookmarkedBy": uid }
}

#[derive(Clone)]
pub struct BookmarkDao {
    collection: Collection<BookmarkDoc>,
}

impl BookmarkDao {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("bookmarks"),
        }
    }

    pub async fn find_bookmarks_of(
        &self,
        uid: ObjectId,
    ) -> mongodb::error::Result<Vec<BookmarkDoc>> {
        self.collection
            .find(doc! { "BookmarkedBy": uid })
            .await?
            .try_collect()
            .await
    }

    pub async fn create(
        &self,
        uid: ObjectId,
        tid: ObjectId,
    ) -> mongodb::error::Result<BookmarkDoc> {
        let bookmark = BookmarkDoc {
            id: None,
            bookmarked_tuit: tid,
            bookmarked_by: uid,
        };
        let result = self.collection.insert_one(&bookmark).await?;
        Ok(BookmarkDoc {
            id: result.inserted_id.as_object_id(),
            ..bookmark
        })
    }

    pub async fn delete(
        &self,
        uid: ObjectId,
        tid: ObjectId,
    ) -> mongodb::error::Result<DeleteResult> {
        self.collection.delete_one(pair_filter(uid, tid)).await
    }

    pub async fn delete_all_for_user(
        &self,
        uid: ObjectId,
    ) -> mongodb::error::Result<DeleteResult> {
        self.collection
            .delete_many(doc! { "BookmarkedBy": uid })
            .await
    }

    pub async fn exists(&self, uid: ObjectId, tid: ObjectId) -> mongodb::error::Result<bool> {
        let count = self
            .collection
            .count_documents(pair_filter(uid, tid))
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_filter_matches_the_stored_field_names() {
        let uid = ObjectId::new();
        let tid = ObjectId::new();
        let filter = pair_filter(uid, tid);
        assert_eq!(filter.get_object_id("BookmarkedBy").unwrap(), uid);
        assert_eq!(filter.get_object_id("bookmarkedTuit").unwrap(), tid);
    }
}
