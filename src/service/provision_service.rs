use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};

use crate::model::app_user::RoleGrant;
use crate::model::provision_plan::ProvisionPlan;
use crate::repository::admin_repo::AdminRepository;
use crate::repository::auth_record_repo::AuthRecordRepository;
use crate::util::error::ServiceError;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

/// Hash algorithm the seeded password is expected to use
pub const EXPECTED_HASH_ALGORITHM: &str = "argon2i";

#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub username: String,
    pub collection: String,
    pub inserted_id: Option<String>,
    pub provisioned_at: String,
}

#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub username: String,
    pub roles: Vec<RoleGrant>,
    pub collection: String,
    pub document_count: u64,
    pub record_id: Option<String>,
    pub hash_algorithm: String,
}

#[async_trait]
pub trait ProvisionService: Send + Sync {
    /// Create the user, then the collection, then insert the seed record.
    /// The first failure aborts the remaining steps.
    async fn provision(&self) -> Result<ProvisionReport, ServiceError>;

    /// Read back what `provision` created and check it against the plan.
    async fn verify(&self) -> Result<VerificationReport, ServiceError>;
}

pub struct ProvisionServiceImpl {
    pub plan: ProvisionPlan,
    pub admin_repo: Arc<dyn AdminRepository>,
    pub auth_repo: Arc<dyn AuthRecordRepository>,
}

impl ProvisionServiceImpl {
    pub fn new(
        plan: ProvisionPlan,
        admin_repo: Arc<dyn AdminRepository>,
        auth_repo: Arc<dyn AuthRecordRepository>,
    ) -> Self {
        Self { plan, admin_repo, auth_repo }
    }
}

fn id_string(id: &Option<ObjectId>) -> Option<String> {
    id.as_ref().map(|id| id.to_hex())
}

#[async_trait]
impl ProvisionService for ProvisionServiceImpl {
    #[instrument(skip(self))]
    async fn provision(&self) -> Result<ProvisionReport, ServiceError> {
        info!("Step 1/3: creating application user {}", self.plan.app_user.username);
        if let Err(e) = self.admin_repo.create_user(&self.plan.app_user).await {
            if e.is_already_exists() {
                warn!("Application user already exists; database looks provisioned");
            }
            error!("Provisioning aborted at user creation: {e}");
            return Err(e.into());
        }

        info!("Step 2/3: creating collection {}", self.plan.collection);
        if let Err(e) = self.admin_repo.create_collection(&self.plan.collection).await {
            error!("Provisioning aborted at collection creation: {e}");
            return Err(e.into());
        }

        info!("Step 3/3: inserting seed record");
        let inserted = match self.auth_repo.insert(self.plan.record.clone()).await {
            Ok(record) => record,
            Err(e) => {
                error!("Provisioning aborted at seed insert: {e}");
                return Err(e.into());
            }
        };

        info!("Provisioning complete");
        Ok(ProvisionReport {
            username: self.plan.app_user.username.clone(),
            collection: self.plan.collection.clone(),
            inserted_id: id_string(&inserted.id),
            provisioned_at: chrono::Local::now().to_rfc3339(),
        })
    }

    #[instrument(skip(self))]
    async fn verify(&self) -> Result<VerificationReport, ServiceError> {
        info!("Verifying provisioned state");
        let plan = &self.plan;

        let user = self
            .admin_repo
            .find_user(&plan.app_user.username)
            .await?
            .ok_or_else(|| {
                error!("Application user not found");
                ServiceError::NotFound(format!("User '{}' not found", plan.app_user.username))
            })?;
        for grant in &plan.app_user.roles {
            if !user.has_role(grant) {
                error!("User is missing role {} on {}", grant.role, grant.db);
                return Err(ServiceError::InvalidInput(format!(
                    "User '{}' lacks role '{}' on database '{}'",
                    user.user, grant.role, grant.db
                )));
            }
        }

        if !self.admin_repo.collection_exists(&plan.collection).await? {
            error!("Collection not found");
            return Err(ServiceError::NotFound(format!("Collection '{}' not found", plan.collection)));
        }

        let document_count = self.auth_repo.count().await?;
        if document_count != 1 {
            error!("Expected exactly one record, found {}", document_count);
            return Err(ServiceError::InvalidInput(format!(
                "Collection '{}' holds {} documents, expected 1",
                plan.collection, document_count
            )));
        }

        let record = self
            .auth_repo
            .find_by_user(&plan.record.user)
            .await?
            .ok_or_else(|| {
                error!("Seed record not found");
                ServiceError::NotFound(format!("Record for '{}' not found", plan.record.user))
            })?;
        if !record.same_content(&plan.record) {
            error!("Stored record differs from seed: {:?}", record);
            return Err(ServiceError::InvalidInput(format!(
                "Record for '{}' does not match the seed",
                plan.record.user
            )));
        }

        let scheme = PasswordUtilsImpl::describe_hash(&record.password)
            .map_err(|e| ServiceError::InvalidInput(format!("Stored password hash: {}", e)))?;
        if scheme.algorithm != EXPECTED_HASH_ALGORITHM {
            return Err(ServiceError::InvalidInput(format!(
                "Stored password uses '{}', expected '{}'",
                scheme.algorithm, EXPECTED_HASH_ALGORITHM
            )));
        }

        info!("Provisioned state verified");
        Ok(VerificationReport {
            username: user.user,
            roles: user.roles,
            collection: plan.collection.clone(),
            document_count,
            record_id: id_string(&record.id),
            hash_algorithm: scheme.algorithm,
        })
    }
}
