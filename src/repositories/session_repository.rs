use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::PlayerSession};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: PlayerSession) -> AppResult<PlayerSession>;
    /// All recorded sessions, newest first.
    async fn find_all(&self) -> AppResult<Vec<PlayerSession>>;
    async fn find_by_player_name(&self, name: &str) -> AppResult<Vec<PlayerSession>>;
}

pub struct MongoSessionRepository {
    collection: Collection<PlayerSession>,
}

impl MongoSessionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for sessions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1, "date": -1 })
            .options(IndexOptions::builder().name("name_date".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(name_index).await?;

        log::info!("Successfully created indexes for sessions collection");
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MongoSessionRepository {
    async fn create(&self, session: PlayerSession) -> AppResult<PlayerSession> {
        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    async fn find_all(&self) -> AppResult<Vec<PlayerSession>> {
        let sessions = self
            .collection
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(sessions)
    }

    async fn find_by_player_name(&self, name: &str) -> AppResult<Vec<PlayerSession>> {
        let sessions = self
            .collection
            .find(doc! { "name": name })
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(sessions)
    }
}
