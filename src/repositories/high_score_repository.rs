use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use std::future::Future;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::HighScore,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HighScoreRepository: Send + Sync {
    /// Highest scores first, at most `limit` entries.
    async fn top(&self, limit: i64) -> AppResult<Vec<HighScore>>;
    async fn insert(&self, entry: HighScore) -> AppResult<HighScore>;
    /// Removes `evict_id` and inserts `entry`, but only while the evicted
    /// document still holds `expected_score`. Returns `false` when it did not.
    async fn replace_if_unchanged(
        &self,
        evict_id: &str,
        expected_score: i32,
        entry: HighScore,
    ) -> AppResult<bool>;
}

pub struct MongoHighScoreRepository {
    collection: Collection<HighScore>,
}

impl MongoHighScoreRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for highscores collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let score_index = IndexModel::builder()
            .keys(doc! { "score": -1 })
            .options(IndexOptions::builder().name("score_desc".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(score_index).await?;

        log::info!("Successfully created indexes for highscores collection");
        Ok(())
    }
}

/// Awaits `insert`; when it fails, awaits `restore` to put the evicted entry
/// back before returning the insert error.
async fn insert_or_restore<I, R>(insert: I, restore: R) -> AppResult<()>
where
    I: Future<Output = AppResult<()>>,
    R: Future<Output = AppResult<()>>,
{
    let Err(err) = insert.await else {
        return Ok(());
    };

    if let Err(restore_err) = restore.await {
        log::error!("Failed to restore evicted high score: {}", restore_err);
        return Err(AppError::DatabaseError(format!(
            "{}; evicted entry could not be restored: {}",
            err, restore_err
        )));
    }
    Err(err)
}

#[async_trait]
impl HighScoreRepository for MongoHighScoreRepository {
    async fn top(&self, limit: i64) -> AppResult<Vec<HighScore>> {
        let scores = self
            .collection
            .find(doc! {})
            .sort(doc! { "score": -1, "date": 1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(scores)
    }

    async fn insert(&self, entry: HighScore) -> AppResult<HighScore> {
        self.collection.insert_one(&entry).await?;
        Ok(entry)
    }

    async fn replace_if_unchanged(
        &self,
        evict_id: &str,
        expected_score: i32,
        entry: HighScore,
    ) -> AppResult<bool> {
        let evicted = self
            .collection
            .find_one_and_delete(doc! { "id": evict_id, "score": expected_score })
            .await?;

        let Some(evicted) = evicted else {
            return Ok(false);
        };

        insert_or_restore(
            async {
                self.collection.insert_one(&entry).await?;
                Ok::<(), AppError>(())
            },
            async {
                self.collection.insert_one(&evicted).await?;
                Ok::<(), AppError>(())
            },
        )
        .await?;
        Ok(true)
    }
}
