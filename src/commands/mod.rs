//! Command layer: the functions a UI host calls.
//!
//! Thin wrappers over `CoreState`. Each returns `Result<T, String>` so any
//! transport can hand the error text straight to the frontend.

pub mod analytics;
pub mod appointments;
pub mod navigation;
pub mod patients;
pub mod session;

use crate::core_state::CoreState;
use crate::models::User;

pub const VIEW_PATIENTS: &str = "view_patients";
pub const VIEW_APPOINTMENTS: &str = "view_appointments";
pub const EDIT_APPOINTMENTS: &str = "edit_appointments";

/// Health check command, verifies the core is reachable.
pub fn health_check() -> String {
    tracing::debug!("Health check called");
    "ok".to_string()
}

/// Signed-in user holding `permission`, or the error text to show.
pub(crate) fn require_permission(state: &CoreState, permission: &str) -> Result<User, String> {
    let user = state.session().require_user().map_err(|e| e.to_string())?;
    if !user.has_permission(permission) {
        tracing::warn!(user_id = %user.id, permission, "Permission denied");
        return Err(format!("Permission denied: {permission}"));
    }
    Ok(user)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::core_state::CoreState;

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 16).unwrap()
    }

    pub fn state() -> CoreState {
        CoreState::in_memory(7, today())
    }

    pub async fn signed_in(email: &str, password: &str) -> CoreState {
        let state = state();
        state.session().login(email, password).await.unwrap();
        state
    }
}
