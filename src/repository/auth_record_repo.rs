use crate::model::auth_record::AuthRecord;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use tracing::{error, info};

#[async_trait]
pub trait AuthRecordRepository: Send + Sync {
    async fn insert(&self, record: AuthRecord) -> RepositoryResult<AuthRecord>;
    async fn find_by_user(&self, user: &str) -> RepositoryResult<Option<AuthRecord>>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoAuthRecordRepository {
    collection: mongodb::Collection<AuthRecord>,
}

impl MongoAuthRecordRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str) -> Self {
        let collection = db.collection::<AuthRecord>(collection_name);
        MongoAuthRecordRepository { collection }
    }
}

#[async_trait]
impl AuthRecordRepository for MongoAuthRecordRepository {
    #[tracing::instrument(skip(self, record), fields(user = %record.user))]
    async fn insert(&self, record: AuthRecord) -> RepositoryResult<AuthRecord> {
        info!("Inserting auth record");
        let mut new_record = record;
        new_record.id = Some(ObjectId::new());

        let result = self.collection.insert_one(new_record.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Auth record inserted");
                Ok(new_record)
            }
            Err(e) => {
                error!("Failed to insert auth record: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_user(&self, user: &str) -> RepositoryResult<Option<AuthRecord>> {
        let filter = doc! { "user": user };
        self.collection.find_one(filter, None).await.map_err(|e| {
            error!("Failed to find auth record: {}", e);
            RepositoryError::from(e)
        })
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        self.collection.count_documents(doc! {}, None).await.map_err(|e| {
            error!("Failed to count auth records: {}", e);
            RepositoryError::from(e)
        })
    }
}
