use std::sync::Arc;

use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::model::provision_plan::ProvisionPlan;
use crate::repository::admin_repo::MongoAdminRepository;
use crate::repository::auth_record_repo::MongoAuthRecordRepository;
use crate::repository::repository_error::RepositoryError;
use crate::service::provision_service::{
    ProvisionReport, ProvisionService, ProvisionServiceImpl, VerificationReport,
};
use crate::util::error::ServiceError;

pub struct App {
    pub provision_service: Arc<dyn ProvisionService>,
}

impl App {
    /// Connect to the configured database and wire the repositories.
    pub async fn new(config: &MongoConfig) -> Result<Self, ServiceError> {
        let db = crate::repository::connect(config).await.map_err(|e| {
            error!("Failed to set up MongoDB client: {e}");
            ServiceError::from(RepositoryError::from(e))
        })?;

        let plan = ProvisionPlan::default();
        let admin_repo = Arc::new(MongoAdminRepository::new(db.clone()));
        let auth_repo = Arc::new(MongoAuthRecordRepository::new(&db, &plan.collection));
        let provision_service = Arc::new(ProvisionServiceImpl::new(plan, admin_repo, auth_repo));

        Ok(App { provision_service })
    }

    pub fn with_service(provision_service: Arc<dyn ProvisionService>) -> Self {
        App { provision_service }
    }

    /// Provision once, then confirm the result.
    pub async fn run(&self) -> Result<(ProvisionReport, VerificationReport), ServiceError> {
        let provisioned = self.provision_service.provision().await?;
        info!(
            "✅ Created user '{}', collection '{}', record {:?}",
            provisioned.username, provisioned.collection, provisioned.inserted_id
        );

        let verified = self.provision_service.verify().await?;
        info!(
            "✅ Verified {} document(s) in '{}' (hash: {})",
            verified.document_count, verified.collection, verified.hash_algorithm
        );
        Ok((provisioned, verified))
    }
}
