//! Role-gated sidebar navigation.
//!
//! An item with no role list is open to everyone, including signed-out
//! visitors. A restricted item needs a signed-in user whose role is listed.

use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub href: String,
    /// `None` = unrestricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

impl NavItem {
    pub fn open(title: &str, href: &str) -> Self {
        Self {
            title: title.to_string(),
            href: href.to_string(),
            roles: None,
        }
    }

    pub fn restricted(title: &str, href: &str, roles: &[Role]) -> Self {
        Self {
            roles: Some(roles.to_vec()),
            ..Self::open(title, href)
        }
    }

    pub fn is_visible_to(&self, user: Option<&User>) -> bool {
        match (&self.roles, user) {
            (None, _) => true,
            (Some(roles), Some(user)) => roles.contains(&user.role),
            (Some(_), None) => false,
        }
    }

    /// Current route is this item's page.
    pub fn is_active(&self, pathname: &str) -> bool {
        self.href == pathname
    }
}

/// The dashboard sidebar, in display order.
pub fn default_nav_items() -> Vec<NavItem> {
    vec![
        NavItem::open("Dashboard", "/dashboard"),
        NavItem::open("Patient Records", "/patients"),
        NavItem::open("Appointments", "/appointments"),
        NavItem::open("Messaging", "/messaging"),
        NavItem::open("Patient Portal", "/portal"),
        NavItem::open("Blood Bank", "/blood-bank"),
        NavItem::restricted("Administrative", "/admin", &[Role::Admin]),
    ]
}

/// Items `user` may see, order preserved.
pub fn visible_items(items: &[NavItem], user: Option<&User>) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| item.is_visible_to(user))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::directory_user;

    fn titles(items: &[NavItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn doctor_does_not_see_admin_item() {
        let doctor = directory_user("doctor@careos.com").unwrap();
        let items = visible_items(&default_nav_items(), Some(&doctor));
        assert_eq!(items.len(), 6);
        assert!(!titles(&items).contains(&"Administrative"));
    }

    #[test]
    fn admin_sees_everything() {
        let admin = directory_user("admin@careos.com").unwrap();
        let items = visible_items(&default_nav_items(), Some(&admin));
        assert_eq!(items, default_nav_items());
    }

    #[test]
    fn signed_out_sees_only_unrestricted() {
        let items = visible_items(&default_nav_items(), None);
        assert!(items.iter().all(|i| i.roles.is_none()));
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn multi_role_item() {
        let item = NavItem::restricted("Lab Results", "/lab", &[Role::Lab, Role::Doctor]);
        let nurse = directory_user("nurse@careos.com").unwrap();
        let lab = directory_user("lab@careos.com").unwrap();
        assert!(!item.is_visible_to(Some(&nurse)));
        assert!(item.is_visible_to(Some(&lab)));
    }

    #[test]
    fn active_item_matches_exact_path() {
        let item = NavItem::open("Appointments", "/appointments");
        assert!(item.is_active("/appointments"));
        assert!(!item.is_active("/appointments/new"));
    }
}
