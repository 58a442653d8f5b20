//! Patient records and advanced search commands.
//!
//! All require `view_patients`. Edits go to the draft; nothing is
//! recomputed until `apply_patient_search`.

use serde::Serialize;

use super::{require_permission, VIEW_PATIENTS};
use crate::core_state::CoreState;
use crate::models::{FilterDimension, PatientRecord, PatientSortOption, SearchFilters};
use crate::search::{RecentSearch, SavedSearch};

/// What the results panel renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSearchView {
    pub results: Vec<PatientRecord>,
    pub total_records: usize,
    pub active_filters: SearchFilters,
    pub active_filter_count: usize,
    pub sort: String,
}

fn view(state: &CoreState) -> Result<PatientSearchView, String> {
    let search = state.lock_patient_search().map_err(|e| e.to_string())?;
    Ok(PatientSearchView {
        results: search.results().to_vec(),
        total_records: search.records().len(),
        active_filters: search.active().clone(),
        active_filter_count: search.active().active_filter_count(),
        sort: search.sort_option().to_string(),
    })
}

pub fn get_patient_search(state: &CoreState) -> Result<PatientSearchView, String> {
    require_permission(state, VIEW_PATIENTS)?;
    view(state)
}

pub fn get_patient(state: &CoreState, id: &str) -> Result<PatientRecord, String> {
    require_permission(state, VIEW_PATIENTS)?;
    state.find_patient(id).map_err(|e| e.to_string())
}

/// Replace the draft filters. Inverted age ranges are already rejected
/// when `SearchFilters` is deserialized.
pub fn set_patient_search_draft(state: &CoreState, filters: SearchFilters) -> Result<(), String> {
    require_permission(state, VIEW_PATIENTS)?;
    let mut search = state.lock_patient_search().map_err(|e| e.to_string())?;
    search.set_draft(filters);
    Ok(())
}

pub fn apply_patient_search(state: &CoreState) -> Result<PatientSearchView, String> {
    require_permission(state, VIEW_PATIENTS)?;
    state
        .lock_patient_search()
        .map_err(|e| e.to_string())?
        .apply();
    view(state)
}

pub fn reset_patient_search(state: &CoreState) -> Result<PatientSearchView, String> {
    require_permission(state, VIEW_PATIENTS)?;
    state
        .lock_patient_search()
        .map_err(|e| e.to_string())?
        .reset();
    view(state)
}

/// Re-sort current results. `sort` is `"<field>-<direction>"`.
pub fn change_patient_sort(state: &CoreState, sort: &str) -> Result<PatientSearchView, String> {
    require_permission(state, VIEW_PATIENTS)?;
    let option = sort
        .parse::<PatientSortOption>()
        .map_err(|e| e.to_string())?;
    state
        .lock_patient_search()
        .map_err(|e| e.to_string())?
        .sort_change(option);
    view(state)
}

/// Drop one filter chip from the draft and recompute. Other draft edits
/// are kept; recent searches are not touched.
pub fn remove_patient_filter(
    state: &CoreState,
    dimension: &str,
    value: &str,
) -> Result<PatientSearchView, String> {
    require_permission(state, VIEW_PATIENTS)?;
    let dimension = dimension
        .parse::<FilterDimension>()
        .map_err(|e| e.to_string())?;
    state
        .lock_patient_search()
        .map_err(|e| e.to_string())?
        .refine(|draft| {
            draft.dimension_mut(dimension).remove(value);
        });
    view(state)
}

pub fn save_patient_search(state: &CoreState, name: &str) -> Result<(), String> {
    require_permission(state, VIEW_PATIENTS)?;
    state
        .lock_patient_search()
        .map_err(|e| e.to_string())?
        .save_active(name)
        .map_err(|e| e.to_string())
}

pub fn apply_saved_patient_search(state: &CoreState, name: &str) -> Result<PatientSearchView, String> {
    require_permission(state, VIEW_PATIENTS)?;
    state
        .lock_patient_search()
        .map_err(|e| e.to_string())?
        .apply_saved(name)
        .map_err(|e| e.to_string())?;
    view(state)
}

pub fn delete_saved_patient_search(state: &CoreState, name: &str) -> Result<bool, String> {
    require_permission(state, VIEW_PATIENTS)?;
    state
        .lock_patient_search()
        .map_err(|e| e.to_string())?
        .delete_saved(name)
        .map_err(|e| e.to_string())
}

pub fn list_saved_patient_searches(state: &CoreState) -> Result<Vec<SavedSearch<SearchFilters>>, String> {
    require_permission(state, VIEW_PATIENTS)?;
    let search = state.lock_patient_search().map_err(|e| e.to_string())?;
    Ok(search.history().map(|h| h.saved().to_vec()).unwrap_or_default())
}

pub fn list_recent_patient_searches(state: &CoreState) -> Result<Vec<RecentSearch>, String> {
    require_permission(state, VIEW_PATIENTS)?;
    let search = state.lock_patient_search().map_err(|e| e.to_string())?;
    Ok(search.history().map(|h| h.recent().to_vec()).unwrap_or_default())
}

pub fn apply_recent_patient_search(state: &CoreState, query: &str) -> Result<PatientSearchView, String> {
    require_permission(state, VIEW_PATIENTS)?;
    state
        .lock_patient_search()
        .map_err(|e| e.to_string())?
        .apply_recent(query);
    view(state)
}

pub fn clear_recent_patient_searches(state: &CoreState) -> Result<(), String> {
    require_permission(state, VIEW_PATIENTS)?;
    state
        .lock_patient_search()
        .map_err(|e| e.to_string())?
        .clear_recent()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{signed_in, state};
    use crate::config::{RECENT_SEARCHES_KEY, SAVED_SEARCHES_KEY};
    use crate::models::AgeRange;

    async fn doctor() -> CoreState {
        signed_in("doctor@careos.com", "doctor123").await
    }

    fn ids(view: &PatientSearchView) -> Vec<&str> {
        view.results.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn signed_out_is_rejected() {
        assert_eq!(get_patient_search(&state()).unwrap_err(), "Not signed in");
    }

    #[tokio::test]
    async fn diabetes_scenario() {
        let state = doctor().await;
        let mut filters = SearchFilters::default();
        filters.condition.insert("Diabetes".into());
        set_patient_search_draft(&state, filters).unwrap();

        let before = get_patient_search(&state).unwrap();
        assert_eq!(before.results.len(), 20);

        let view = apply_patient_search(&state).unwrap();
        assert_eq!(ids(&view), vec!["P-1003"]);
        assert_eq!(view.active_filter_count, 1);
    }

    #[tokio::test]
    async fn query_goes_to_recent_searches() {
        let state = doctor().await;
        set_patient_search_draft(&state, SearchFilters::with_query("smith")).unwrap();
        let view = apply_patient_search(&state).unwrap();
        assert_eq!(ids(&view), vec!["P-1001"]);

        let recent = list_recent_patient_searches(&state).unwrap();
        assert_eq!(recent[0].query, "smith");
        assert!(state.store().get_item(RECENT_SEARCHES_KEY).unwrap().is_some());

        clear_recent_patient_searches(&state).unwrap();
        assert!(list_recent_patient_searches(&state).unwrap().is_empty());
    }

    #[tokio::test]
    async fn sort_then_reset() {
        let state = doctor().await;
        let mut filters = SearchFilters::default();
        filters.age_range = AgeRange::new(60, 100).unwrap();
        set_patient_search_draft(&state, filters).unwrap();
        apply_patient_search(&state).unwrap();

        let view = change_patient_sort(&state, "age-desc").unwrap();
        assert_eq!(ids(&view), vec!["P-1011", "P-1015", "P-1005"]);
        assert_eq!(view.sort, "age-desc");
        assert!(change_patient_sort(&state, "weight-asc").is_err());

        let view = reset_patient_search(&state).unwrap();
        assert_eq!(view.results.len(), 20);
        assert_eq!(view.active_filter_count, 0);
    }

    #[tokio::test]
    async fn remove_chip_reapplies() {
        let state = doctor().await;
        let mut filters = SearchFilters::default();
        filters.department.insert("Cardiology".into());
        filters.status.insert("Critical".into());
        set_patient_search_draft(&state, filters).unwrap();
        assert_eq!(ids(&apply_patient_search(&state).unwrap()), vec!["P-1005"]);

        let view = remove_patient_filter(&state, "status", "Critical").unwrap();
        assert_eq!(view.results.len(), 2);
        assert!(remove_patient_filter(&state, "shoeSize", "9").is_err());
    }

    #[tokio::test]
    async fn removing_chip_keeps_draft_edits_and_history() {
        let state = doctor().await;
        let mut filters = SearchFilters::with_query("wilson");
        filters.gender.insert("Male".into());
        set_patient_search_draft(&state, filters).unwrap();
        apply_patient_search(&state).unwrap();
        clear_recent_patient_searches(&state).unwrap();

        let mut draft = get_patient_search(&state).unwrap().active_filters;
        draft.department.insert("Cardiology".into());
        set_patient_search_draft(&state, draft).unwrap();

        let view = remove_patient_filter(&state, "gender", "Male").unwrap();
        assert_eq!(ids(&view), vec!["P-1005"]);
        assert!(view.active_filters.gender.is_empty());
        assert!(view.active_filters.department.contains("Cardiology"));
        assert!(list_recent_patient_searches(&state).unwrap().is_empty());
    }

    #[tokio::test]
    async fn saved_search_lifecycle() {
        let state = doctor().await;
        let mut filters = SearchFilters::default();
        filters.department.insert("Pulmonology".into());
        set_patient_search_draft(&state, filters).unwrap();
        apply_patient_search(&state).unwrap();
        save_patient_search(&state, "Lungs").unwrap();
        assert!(save_patient_search(&state, "").is_err());
        assert!(state.store().get_item(SAVED_SEARCHES_KEY).unwrap().is_some());

        reset_patient_search(&state).unwrap();
        let view = apply_saved_patient_search(&state, "Lungs").unwrap();
        assert_eq!(view.results.len(), 3);
        assert_eq!(list_saved_patient_searches(&state).unwrap().len(), 1);

        assert!(delete_saved_patient_search(&state, "Lungs").unwrap());
        assert_eq!(
            apply_saved_patient_search(&state, "Lungs").unwrap_err(),
            "Saved search not found: Lungs"
        );
    }

    #[tokio::test]
    async fn recent_search_reapplies_with_default_filters() {
        let state = doctor().await;
        let view = apply_recent_patient_search(&state, "wilson").unwrap();
        assert_eq!(view.results.len(), 4);
        assert_eq!(view.active_filters.query, "wilson");
    }

    #[tokio::test]
    async fn patient_lookup() {
        let state = doctor().await;
        assert_eq!(get_patient(&state, "P-1012").unwrap().name, "Olivia Garcia");
        assert_eq!(get_patient(&state, "P-0000").unwrap_err(), "Patient not found: P-0000");
    }
}
