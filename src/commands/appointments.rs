//! Appointment calendar, list, detail and reports commands.
//!
//! Reads need `view_appointments`; status changes, check-in and booking
//! need `edit_appointments`.

use chrono::NaiveDate;
use serde::Serialize;

use super::{require_permission, EDIT_APPOINTMENTS, VIEW_APPOINTMENTS};
use crate::appointment::{
    allowed_transitions, AppointmentReport, CheckInForm, NewAppointment, ReportWindow,
};
use crate::core_state::CoreState;
use crate::models::{AppointmentFilters, AppointmentSortOption, AppointmentStatus, CalendarAppointment};

/// Detail panel: the appointment plus the status controls to offer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    pub appointment: CalendarAppointment,
    pub allowed_statuses: Vec<AppointmentStatus>,
}

pub async fn list_appointments(
    state: &CoreState,
    filters: AppointmentFilters,
    sort: Option<String>,
) -> Result<Vec<CalendarAppointment>, String> {
    require_permission(state, VIEW_APPOINTMENTS)?;
    let sort = match sort {
        Some(s) => s
            .parse::<AppointmentSortOption>()
            .map_err(|e| e.to_string())?,
        None => AppointmentSortOption::default(),
    };
    let book = state.appointments.lock().await;
    Ok(book.filtered(&filters, sort))
}

/// Calendar cell contents for one day.
pub async fn appointments_on(state: &CoreState, date: NaiveDate) -> Result<Vec<CalendarAppointment>, String> {
    require_permission(state, VIEW_APPOINTMENTS)?;
    Ok(state.appointments.lock().await.on_date(date))
}

pub async fn get_appointment(state: &CoreState, id: &str) -> Result<AppointmentDetail, String> {
    require_permission(state, VIEW_APPOINTMENTS)?;
    let book = state.appointments.lock().await;
    let appointment = book.get(id).map_err(|e| e.to_string())?.clone();
    Ok(AppointmentDetail {
        allowed_statuses: allowed_transitions(appointment.status),
        appointment,
    })
}

/// `status` uses the wire values (`"checked-in"`, `"no-show"`, ...).
pub async fn update_appointment_status(
    state: &CoreState,
    id: &str,
    status: &str,
) -> Result<CalendarAppointment, String> {
    require_permission(state, EDIT_APPOINTMENTS)?;
    let status = status
        .parse::<AppointmentStatus>()
        .map_err(|e| e.to_string())?;
    let mut book = state.appointments.lock().await;
    book.update_status(id, status).await.map_err(|e| e.to_string())
}

pub async fn check_in_appointment(
    state: &CoreState,
    id: &str,
    form: CheckInForm,
) -> Result<CalendarAppointment, String> {
    require_permission(state, EDIT_APPOINTMENTS)?;
    let mut book = state.appointments.lock().await;
    book.check_in(id, &form).await.map_err(|e| e.to_string())
}

pub async fn schedule_appointment(
    state: &CoreState,
    request: NewAppointment,
) -> Result<CalendarAppointment, String> {
    require_permission(state, EDIT_APPOINTMENTS)?;
    let mut book = state.appointments.lock().await;
    book.schedule(request).await.map_err(|e| e.to_string())
}

pub async fn appointment_report(
    state: &CoreState,
    window: ReportWindow,
    today: NaiveDate,
) -> Result<AppointmentReport, String> {
    require_permission(state, VIEW_APPOINTMENTS)?;
    if let ReportWindow::Custom { start, end } = window {
        if start > end {
            return Err(format!("Report range is inverted: {start} > {end}"));
        }
    }
    Ok(state.appointments.lock().await.report(window, today))
}
