//! Appointment workflow: guarded status transitions, check-in, scheduling
//! and the report screen's aggregates.
//!
//! Every status change goes through [`transition`]. The book validates,
//! waits out the simulated call, and only then commits, so a rejected or
//! failed request leaves the appointment untouched.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{Datelike, Duration as Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::latency::simulated_call;
use crate::models::{
    parse_display_time, AppointmentFilters, AppointmentSortOption, AppointmentStatus,
    CalendarAppointment,
};
use crate::search::{filter_records, sort_records};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot move appointment from {from} to {to}")]
pub struct InvalidTransition {
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

// ─── Status state machine ────────────────────────────────────────────────────

/// Position on the main visit chain; `None` for the two side exits.
fn chain_rank(status: AppointmentStatus) -> Option<u8> {
    match status {
        AppointmentStatus::Scheduled => Some(0),
        AppointmentStatus::Confirmed => Some(1),
        AppointmentStatus::CheckedIn => Some(2),
        AppointmentStatus::InProgress => Some(3),
        AppointmentStatus::Completed => Some(4),
        AppointmentStatus::Cancelled | AppointmentStatus::NoShow => None,
    }
}

/// Validate a status change and return the new status.
///
/// Moves forward along scheduled → confirmed → checked-in → in-progress →
/// completed, skipping ahead allowed. Cancelled and no-show are reachable from
/// any open state. Completed and cancelled are final; no-show can still be
/// cancelled.
pub fn transition(
    current: AppointmentStatus,
    requested: AppointmentStatus,
) -> Result<AppointmentStatus, InvalidTransition> {
    use AppointmentStatus::*;

    let allowed = match (current, requested) {
        (Completed | Cancelled, _) => false,
        (NoShow, to) => to == Cancelled,
        (_, Cancelled | NoShow) => true,
        (from, to) => match (chain_rank(from), chain_rank(to)) {
            (Some(a), Some(b)) => b > a,
            _ => false,
        },
    };

    if allowed {
        Ok(requested)
    } else {
        Err(InvalidTransition {
            from: current,
            to: requested,
        })
    }
}

/// Targets reachable from `status`, in declaration order.
pub fn allowed_transitions(status: AppointmentStatus) -> Vec<AppointmentStatus> {
    AppointmentStatus::ALL
        .iter()
        .copied()
        .filter(|to| transition(status, *to).is_ok())
        .collect()
}

/// No further transitions possible.
pub fn is_terminal(status: AppointmentStatus) -> bool {
    allowed_transitions(status).is_empty()
}

// ─── Forms ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vitals {
    pub temperature: String,
    pub blood_pressure: String,
    pub heart_rate: String,
    pub respiratory_rate: String,
    pub oxygen_saturation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckInConfirmations {
    pub insurance_verified: bool,
    pub identity_verified: bool,
    pub forms_completed: bool,
    pub consent_signed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckInForm {
    pub vitals: Vitals,
    pub confirmations: CheckInConfirmations,
}

impl CheckInForm {
    /// Names of the required items still missing, empty when complete.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.vitals.temperature.trim().is_empty() {
            missing.push("temperature");
        }
        if self.vitals.blood_pressure.trim().is_empty() {
            missing.push("bloodPressure");
        }
        if self.vitals.heart_rate.trim().is_empty() {
            missing.push("heartRate");
        }
        if !self.confirmations.insurance_verified {
            missing.push("insuranceVerified");
        }
        if !self.confirmations.identity_verified {
            missing.push("identityVerified");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), AppointmentError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppointmentError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Booking request from the new-appointment form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDate,
    /// Display time, `h:mm AM/PM`.
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
}

impl NewAppointment {
    pub fn validate(&self) -> Result<(), AppointmentError> {
        let required = [
            ("patient", &self.patient_name),
            ("doctor", &self.doctor_name),
            ("time", &self.time),
            ("type", &self.appointment_type),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AppointmentError::Validation(format!("Please select a {field}.")));
        }
        if parse_display_time(&self.time).is_none() {
            return Err(AppointmentError::Validation(format!(
                "Unrecognized time: {}",
                self.time
            )));
        }
        Ok(())
    }
}

// ─── Book ────────────────────────────────────────────────────────────────────

/// In-memory appointment list behind the calendar, list and detail screens.
pub struct AppointmentBook {
    appointments: Vec<CalendarAppointment>,
    latency: Duration,
}

impl AppointmentBook {
    pub fn new(appointments: Vec<CalendarAppointment>, latency: Duration) -> Self {
        Self {
            appointments,
            latency,
        }
    }

    pub fn all(&self) -> &[CalendarAppointment] {
        &self.appointments
    }

    pub fn get(&self, id: &str) -> Result<&CalendarAppointment, AppointmentError> {
        self.appointments
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppointmentError::NotFound(id.to_string()))
    }

    fn position(&self, id: &str) -> Result<usize, AppointmentError> {
        self.appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppointmentError::NotFound(id.to_string()))
    }

    /// Same-day appointments, calendar order.
    pub fn on_date(&self, date: NaiveDate) -> Vec<CalendarAppointment> {
        let filters = AppointmentFilters {
            date: Some(date),
            ..Default::default()
        };
        self.filtered(&filters, AppointmentSortOption::default())
    }

    /// The appointment list view: filter, then stable sort.
    pub fn filtered(
        &self,
        filters: &AppointmentFilters,
        sort: AppointmentSortOption,
    ) -> Vec<CalendarAppointment> {
        let mut results = filter_records(&self.appointments, filters);
        sort_records(&mut results, sort);
        results
    }

    /// Guard, wait out the simulated call, then commit.
    pub async fn update_status(
        &mut self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<CalendarAppointment, AppointmentError> {
        let idx = self.position(id)?;
        let from = self.appointments[idx].status;
        let next = transition(from, status)?;

        simulated_call(self.latency).await;

        let appointment = &mut self.appointments[idx];
        appointment.status = next;
        tracing::info!(id, %from, to = %next, "Appointment status updated");
        Ok(appointment.clone())
    }

    /// Validate the check-in form locally, then move to checked-in.
    pub async fn check_in(
        &mut self,
        id: &str,
        form: &CheckInForm,
    ) -> Result<CalendarAppointment, AppointmentError> {
        let idx = self.position(id)?;
        form.validate()?;
        transition(self.appointments[idx].status, AppointmentStatus::CheckedIn)?;
        self.update_status(id, AppointmentStatus::CheckedIn).await
    }

    /// Book a new appointment as `scheduled`.
    pub async fn schedule(
        &mut self,
        request: NewAppointment,
    ) -> Result<CalendarAppointment, AppointmentError> {
        request.validate()?;
        simulated_call(self.latency).await;

        let appointment = CalendarAppointment {
            id: Uuid::new_v4().to_string(),
            patient_name: request.patient_name.trim().to_string(),
            doctor_name: request.doctor_name.trim().to_string(),
            time: request.time.trim().to_string(),
            appointment_type: request.appointment_type.trim().to_string(),
            status: AppointmentStatus::Scheduled,
            date: request.date,
        };
        tracing::info!(id = %appointment.id, date = %appointment.date, "Appointment scheduled");
        self.appointments.push(appointment.clone());
        Ok(appointment)
    }

    pub fn report(&self, window: ReportWindow, today: NaiveDate) -> AppointmentReport {
        let in_window: Vec<CalendarAppointment> = self
            .appointments
            .iter()
            .filter(|a| window.contains(a.date, today))
            .cloned()
            .collect();
        AppointmentReport::from_appointments(&in_window)
    }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Date window of the reports screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportWindow {
    /// The 7 days before today, through today.
    Week,
    /// Calendar month containing today.
    Month,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ReportWindow {
    /// Inclusive bounds relative to `today`.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match *self {
            ReportWindow::Week => (today - Days::days(7), today),
            ReportWindow::Month => {
                let first = today.with_day(1).unwrap_or(today);
                let next_month = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
                };
                let last = next_month.and_then(|d| d.pred_opt()).unwrap_or(today);
                (first, last)
            }
            ReportWindow::Custom { start, end } => (start, end),
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        let (start, end) = self.bounds(today);
        start <= date && date <= end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentReport {
    pub total: usize,
    pub by_status: BTreeMap<AppointmentStatus, usize>,
    pub by_weekday: Vec<(String, usize)>,
}

impl AppointmentReport {
    pub fn from_appointments(appointments: &[CalendarAppointment]) -> Self {
        Self {
            total: appointments.len(),
            by_status: status_counts(appointments),
            by_weekday: counts_by_weekday(appointments)
                .into_iter()
                .map(|(day, n)| (day.to_string(), n))
                .collect(),
        }
    }

    pub fn count(&self, status: AppointmentStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Share of `status` in whole percent; 0 for an empty window.
    pub fn rate(&self, status: AppointmentStatus) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.count(status) as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Count per status, every status present (zero when unseen).
pub fn status_counts(appointments: &[CalendarAppointment]) -> BTreeMap<AppointmentStatus, usize> {
    let mut counts: BTreeMap<AppointmentStatus, usize> =
        AppointmentStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for a in appointments {
        *counts.entry(a.status).or_insert(0) += 1;
    }
    counts
}

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Mon"),
    (Weekday::Tue, "Tue"),
    (Weekday::Wed, "Wed"),
    (Weekday::Thu, "Thu"),
    (Weekday::Fri, "Fri"),
    (Weekday::Sat, "Sat"),
    (Weekday::Sun, "Sun"),
];

/// Count per weekday, Monday first, all seven days present.
pub fn counts_by_weekday(appointments: &[CalendarAppointment]) -> Vec<(&'static str, usize)> {
    WEEKDAYS
        .iter()
        .map(|(day, label)| {
            let n = appointments.iter().filter(|a| a.date.weekday() == *day).count();
            (*label, n)
        })
        .collect()
}
