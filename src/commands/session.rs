//! Sign-in commands.

use serde::Serialize;

use crate::core_state::CoreState;
use crate::models::{dashboard_url, User};

/// Login result: the user plus where to land.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub redirect: String,
}

pub async fn login(state: &CoreState, email: &str, password: &str) -> Result<LoginResponse, String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required".into());
    }
    let user = state
        .session()
        .login(email, password)
        .await
        .map_err(|e| e.to_string())?;
    Ok(LoginResponse {
        redirect: dashboard_url(user.role).to_string(),
        user,
    })
}

pub fn logout(state: &CoreState) -> Result<(), String> {
    state.session().logout().map_err(|e| e.to_string())
}

pub fn current_user(state: &CoreState) -> Result<Option<User>, String> {
    state.session().current_user().map_err(|e| e.to_string())
}

/// Pick up a stored session, e.g. after a reload.
pub fn restore_session(state: &CoreState) -> Result<Option<User>, String> {
    state.session().restore().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::state;

    #[tokio::test]
    async fn admin_lands_on_admin_page() {
        let state = state();
        let response = login(&state, "admin@careos.com", "admin123").await.unwrap();
        assert_eq!(response.redirect, "/admin");
    }

    #[tokio::test]
    async fn staff_land_on_dashboard() {
        let state = state();
        let response = login(&state, "nurse@careos.com", "nurse123").await.unwrap();
        assert_eq!(response.redirect, "/dashboard");
        assert_eq!(current_user(&state).unwrap().unwrap().name, "Nurse Emily Davis");
    }

    #[tokio::test]
    async fn invalid_login_message() {
        let state = state();
        let err = login(&state, "nurse@careos.com", "nope").await.unwrap_err();
        assert_eq!(err, "Invalid email or password");
        assert_eq!(
            login(&state, " ", "x").await.unwrap_err(),
            "Email and password are required"
        );
    }

    #[tokio::test]
    async fn logout_then_restore_is_signed_out() {
        let state = state();
        login(&state, "lab@careos.com", "lab123").await.unwrap();
        logout(&state).unwrap();
        assert!(restore_session(&state).unwrap().is_none());
    }
}
