use bson::{doc, Document};
use serde::{Deserialize, Serialize};

pub const APP_USERNAME: &str = "user";
pub const APP_PASSWORD: &str = "password";
pub const APP_ROLE: &str = "readWrite";
pub const APP_ROLE_DB: &str = "db";

/// A named permission set scoped to one database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

impl RoleGrant {
    pub fn new(role: impl Into<String>, db: impl Into<String>) -> Self {
        RoleGrant { role: role.into(), db: db.into() }
    }
}

/// Database account created for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUser {
    pub username: String,
    pub password: String,
    pub roles: Vec<RoleGrant>,
}

impl AppUser {
    /// The fixed application account
    pub fn seed() -> Self {
        AppUser {
            username: APP_USERNAME.to_string(),
            password: APP_PASSWORD.to_string(),
            roles: vec![RoleGrant::new(APP_ROLE, APP_ROLE_DB)],
        }
    }

    /// `createUser` command document for this account
    pub fn create_user_command(&self) -> Document {
        let roles: Vec<Document> = self
            .roles
            .iter()
            .map(|grant| doc! { "role": &grant.role, "db": &grant.db })
            .collect();
        doc! {
            "createUser": &self.username,
            "pwd": &self.password,
            "roles": roles,
        }
    }
}

/// One entry of a `usersInfo` reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub user: String,
    pub db: String,
    #[serde(default)]
    pub roles: Vec<RoleGrant>,
}

impl UserInfo {
    pub fn has_role(&self, grant: &RoleGrant) -> bool {
        self.roles.contains(grant)
    }
}
