use crate::model::app_user::{AppUser, UserInfo};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::doc;
use serde::Deserialize;
use tracing::{error, info};

/// Administrative operations against the target database
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create_user(&self, user: &AppUser) -> RepositoryResult<()>;
    async fn create_collection(&self, name: &str) -> RepositoryResult<()>;
    async fn find_user(&self, username: &str) -> RepositoryResult<Option<UserInfo>>;
    async fn collection_exists(&self, name: &str) -> RepositoryResult<bool>;
}

#[derive(Debug, Deserialize)]
struct UsersInfoReply {
    #[serde(default)]
    users: Vec<UserInfo>,
}

pub struct MongoAdminRepository {
    db: mongodb::Database,
}

impl MongoAdminRepository {
    pub fn new(db: mongodb::Database) -> Self {
        MongoAdminRepository { db }
    }
}

#[async_trait]
impl AdminRepository for MongoAdminRepository {
    #[tracing::instrument(skip(self, user), fields(username = %user.username))]
    async fn create_user(&self, user: &AppUser) -> RepositoryResult<()> {
        info!("Creating database user");
        match self.db.run_command(user.create_user_command(), None).await {
            Ok(_) => {
                info!("Database user created");
                Ok(())
            }
            Err(e) => {
                error!("Failed to create database user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn create_collection(&self, name: &str) -> RepositoryResult<()> {
        info!("Creating collection");
        match self.db.create_collection(name, None).await {
            Ok(()) => {
                info!("Collection created");
                Ok(())
            }
            Err(e) => {
                error!("Failed to create collection {}: {}", name, e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_user(&self, username: &str) -> RepositoryResult<Option<UserInfo>> {
        let reply = self
            .db
            .run_command(doc! { "usersInfo": username }, None)
            .await
            .map_err(|e| {
                error!("usersInfo failed: {}", e);
                RepositoryError::from(e)
            })?;
        let reply: UsersInfoReply = bson::from_document(reply)?;
        Ok(reply.users.into_iter().find(|u| u.user == username))
    }

    #[tracing::instrument(skip(self))]
    async fn collection_exists(&self, name: &str) -> RepositoryResult<bool> {
        let names = self
            .db
            .list_collection_names(doc! { "name": name })
            .await
            .map_err(|e| {
                error!("Failed to list collections: {}", e);
                RepositoryError::from(e)
            })?;
        Ok(names.iter().any(|n| n == name))
    }
}
