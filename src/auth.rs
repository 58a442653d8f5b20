//! Fixed demo credential directory.
//!
//! Four sample accounts, one per role. Passwords live only as SHA-256
//! digests once the directory is built, and are compared in constant time.

use std::sync::LazyLock;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::models::{Role, User, WILDCARD_PERMISSION};

struct AccountSeed {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
    permissions: &'static [&'static str],
    department: &'static str,
    specialty: Option<&'static str>,
    join_date: &'static str,
    contact_number: &'static str,
    last_active: &'static str,
}

const ACCOUNTS: &[AccountSeed] = &[
    AccountSeed {
        id: "1",
        name: "Admin User",
        email: "admin@careos.com",
        password: "admin123",
        role: Role::Admin,
        permissions: &[WILDCARD_PERMISSION],
        department: "Administration",
        specialty: None,
        join_date: "2020-01-15",
        contact_number: "(555) 123-4567",
        last_active: "2023-04-28T09:15:00",
    },
    AccountSeed {
        id: "2",
        name: "Dr. Sarah Johnson",
        email: "doctor@careos.com",
        password: "doctor123",
        role: Role::Doctor,
        permissions: &["view_patients", "edit_patients", "view_appointments", "edit_appointments"],
        department: "Cardiology",
        specialty: Some("Interventional Cardiology"),
        join_date: "2018-05-10",
        contact_number: "(555) 234-5678",
        last_active: "2023-04-28T10:30:00",
    },
    AccountSeed {
        id: "3",
        name: "Nurse Emily Davis",
        email: "nurse@careos.com",
        password: "nurse123",
        role: Role::Nurse,
        permissions: &["view_patients", "edit_vitals", "view_appointments"],
        department: "Emergency",
        specialty: None,
        join_date: "2019-08-22",
        contact_number: "(555) 345-6789",
        last_active: "2023-04-28T08:45:00",
    },
    AccountSeed {
        id: "4",
        name: "Lab Tech Michael Brown",
        email: "lab@careos.com",
        password: "lab123",
        role: Role::Lab,
        permissions: &["view_lab_tests", "edit_lab_tests", "view_patients"],
        department: "Laboratory",
        specialty: Some("Hematology"),
        join_date: "2021-03-15",
        contact_number: "(555) 456-7890",
        last_active: "2023-04-28T11:20:00",
    },
];

const PROFILE_IMAGE: &str = "/placeholder.svg?height=200&width=200";

struct Account {
    user: User,
    password_hash: [u8; 32],
}

static DIRECTORY: LazyLock<Vec<Account>> = LazyLock::new(|| {
    ACCOUNTS
        .iter()
        .map(|seed| Account {
            user: User {
                id: seed.id.into(),
                name: seed.name.into(),
                email: seed.email.into(),
                role: seed.role,
                permissions: seed.permissions.iter().map(|p| p.to_string()).collect(),
                department: Some(seed.department.into()),
                specialty: seed.specialty.map(Into::into),
                profile_image: Some(PROFILE_IMAGE.into()),
                contact_number: Some(seed.contact_number.into()),
                join_date: Some(seed.join_date.into()),
                last_active: Some(seed.last_active.into()),
            },
            password_hash: hash_password(seed.password),
        })
        .collect()
});

/// SHA-256 of the password bytes.
pub fn hash_password(password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Check a credential pair. Email match is exact; the password digest is
/// compared in constant time.
pub fn authenticate(email: &str, password: &str) -> Option<User> {
    let account = DIRECTORY.iter().find(|a| a.user.email == email)?;
    let candidate = hash_password(password);
    if account.password_hash.ct_eq(&candidate).unwrap_u8() == 1 {
        Some(account.user.clone())
    } else {
        None
    }
}

/// Directory entry by email, without checking a password.
#[cfg(test)]
pub(crate) fn directory_user(email: &str) -> Option<User> {
    DIRECTORY
        .iter()
        .find(|a| a.user.email == email)
        .map(|a| a.user.clone())
}
