//! Sidebar and landing-page commands. Usable while signed out.

use serde::Serialize;

use crate::core_state::CoreState;
use crate::models::dashboard_url;
use crate::navigation::{default_nav_items, visible_items, NavItem};

/// One sidebar row, highlighted when it is the current page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarEntry {
    #[serde(flatten)]
    pub item: NavItem,
    pub active: bool,
}

/// Sidebar entries for whoever is signed in (or nobody), with the entry
/// for `pathname` marked active.
pub fn navigation_items(state: &CoreState, pathname: &str) -> Result<Vec<SidebarEntry>, String> {
    let user = state.session().current_user().map_err(|e| e.to_string())?;
    Ok(visible_items(&default_nav_items(), user.as_ref())
        .into_iter()
        .map(|item| SidebarEntry {
            active: item.is_active(pathname),
            item,
        })
        .collect())
}

/// Landing route for the signed-in user; `/` when signed out.
pub fn home_route(state: &CoreState) -> Result<String, String> {
    let user = state.session().current_user().map_err(|e| e.to_string())?;
    Ok(user.map_or("/", |u| dashboard_url(u.role)).to_string())
}
