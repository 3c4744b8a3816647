pub mod app_user;
pub mod auth_record;
pub mod provision_plan;
