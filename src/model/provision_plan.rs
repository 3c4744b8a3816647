use crate::model::app_user::AppUser;
use crate::model::auth_record::{AuthRecord, AUTH_COLLECTION};

/// Everything the initialization routine creates, in creation order
#[derive(Debug, Clone)]
pub struct ProvisionPlan {
    pub app_user: AppUser,
    pub collection: String,
    pub record: AuthRecord,
}

impl Default for ProvisionPlan {
    fn default() -> Self {
        ProvisionPlan {
            app_user: AppUser::seed(),
            collection: AUTH_COLLECTION.to_string(),
            record: AuthRecord::guest(),
        }
    }
}
