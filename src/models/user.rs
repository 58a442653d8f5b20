use serde::{Deserialize, Serialize};

use super::enums::Role;

/// Permission string granting every other permission.
pub const WILDCARD_PERMISSION: &str = "all";

/// Authenticated dashboard user (never carries a password).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<String>,
}

impl User {
    /// `"all"` grants everything; otherwise an exact match is required.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p == WILDCARD_PERMISSION || p == permission)
    }
}

/// Landing page after login.
pub fn dashboard_url(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Doctor | Role::Nurse | Role::Lab => "/dashboard",
    }
}
