use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const AUTH_COLLECTION: &str = "auth";
pub const GUEST_USER: &str = "guest";
pub const PUBLIC_GROUP: &str = "public";
pub const GUEST_PASSWORD_HASH: &str =
    "$argon2i$v=19$m=102400,t=2,p=8$S4lRqpWSck7JGWMMgTDGGA$MRa3VgoE5o1qZET5/yBRBA";

/// Read/write group membership and admin flag attached to an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessModel {
    pub read_groups: Vec<String>,
    pub write_groups: Vec<String>,
    pub admin_access: bool,
}

/// Identity record stored in the auth collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: String,
    pub am: AccessModel,
    pub password: String,
}

impl AuthRecord {
    /// The guest identity seeded at provisioning time
    pub fn guest() -> Self {
        AuthRecord {
            id: None,
            user: GUEST_USER.to_string(),
            am: AccessModel {
                read_groups: vec![PUBLIC_GROUP.to_string()],
                write_groups: Vec::new(),
                admin_access: false,
            },
            password: GUEST_PASSWORD_HASH.to_string(),
        }
    }

    /// Field equality ignoring the database id
    pub fn same_content(&self, other: &AuthRecord) -> bool {
        self.user == other.user && self.am == other.am && self.password == other.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_record_values() {
        let guest = AuthRecord::guest();
        assert_eq!(guest.user, "guest");
        assert_eq!(guest.am.read_groups, vec!["public".to_string()]);
        assert!(guest.am.write_groups.is_empty());
        assert!(!guest.am.admin_access);
        assert!(guest.password.starts_with("$argon2i$"));
    }

    #[test]
    fn test_unsaved_record_has_no_id_field() {
        let doc = bson::to_document(&AuthRecord::guest()).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("user").unwrap(), "guest");
        let am = doc.get_document("am").unwrap();
        assert_eq!(am.get_array("read_groups").unwrap().len(), 1);
        assert!(am.get_array("write_groups").unwrap().is_empty());
        assert!(!am.get_bool("admin_access").unwrap());
    }

    #[test]
    fn test_same_content_ignores_id() {
        let mut stored = AuthRecord::guest();
        stored.id = Some(ObjectId::new());
        assert!(stored.same_content(&AuthRecord::guest()));

        stored.am.admin_access = true;
        assert!(!stored.same_content(&AuthRecord::guest()));
    }
}
