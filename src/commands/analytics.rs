//! Admin analytics feed.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core_state::CoreState;
use crate::models::Role;
use crate::sample_data::{hospital_metrics, HospitalMetrics};

/// Headline metrics for the analytics screen. Admin only.
pub fn get_hospital_metrics(state: &CoreState) -> Result<HospitalMetrics, String> {
    let user = state.session().require_user().map_err(|e| e.to_string())?;
    if user.role != Role::Admin {
        return Err("Analytics are available to administrators only".into());
    }
    Ok(hospital_metrics(&mut StdRng::from_entropy()))
}
