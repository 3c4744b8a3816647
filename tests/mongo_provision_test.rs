use auth_seed::app::app::App;
use auth_seed::config::mongo_conf::MongoConfig;
use auth_seed::model::app_user::{RoleGrant, APP_USERNAME};
use auth_seed::model::auth_record::{AuthRecord, AUTH_COLLECTION};
use auth_seed::repository::admin_repo::{AdminRepository, MongoAdminRepository};
use auth_seed::repository::auth_record_repo::{AuthRecordRepository, MongoAuthRecordRepository};
use auth_seed::util::error::ServiceError;
use bson::doc;

/// Connects with the .env settings and removes anything a previous run left behind
async fn setup_clean_database() -> (MongoConfig, mongodb::Database) {
    let _ = dotenv::dotenv();
    let config = MongoConfig::from_env().expect("Failed to load MongoConfig");
    let db = auth_seed::repository::connect(&config).await.expect("Failed to connect");

    let _ = db.run_command(doc! { "dropUser": APP_USERNAME }, None).await;
    db.drop(None).await.expect("Failed to drop test database");
    (config, db)
}

#[tokio::test]
#[ignore = "requires a running MongoDB (MONGO_URI with admin credentials)"]
async fn test_provision_live_database() {
    let (config, db) = setup_clean_database().await;
    let app = App::new(&config).await.expect("Failed to build app");

    let (provisioned, verified) = app.run().await.expect("First run should succeed");
    assert_eq!(provisioned.collection, "auth");
    assert_eq!(verified.document_count, 1);

    let admin_repo = MongoAdminRepository::new(db.clone());
    let user = admin_repo.find_user(APP_USERNAME).await.unwrap().expect("user missing");
    assert!(user.has_role(&RoleGrant::new("readWrite", "db")));
    assert!(admin_repo.collection_exists(AUTH_COLLECTION).await.unwrap());

    let auth_repo = MongoAuthRecordRepository::new(&db, AUTH_COLLECTION);
    let guest = auth_repo.find_by_user("guest").await.unwrap().expect("guest missing");
    assert!(guest.same_content(&AuthRecord::guest()));

    // Second run trips over the existing user and leaves the seed alone
    let err = app.run().await.expect_err("Second run should fail");
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(auth_repo.count().await.unwrap(), 1);

    let _ = db.run_command(doc! { "dropUser": APP_USERNAME }, None).await;
}
