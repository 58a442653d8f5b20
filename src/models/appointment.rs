use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

/// Appointment as shown on the calendar and list screens.
///
/// `time` is display text (`"9:30 AM"`); [`CalendarAppointment::time_of_day`]
/// parses it when ordering matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarAppointment {
    pub id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: AppointmentStatus,
    pub date: NaiveDate,
}

impl CalendarAppointment {
    /// Parsed time of day, `None` when the display string is not `h:mm AM/PM`.
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        parse_display_time(&self.time)
    }
}

/// Parse `"9:30 AM"` / `"12:00 PM"` style display times.
pub fn parse_display_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%I:%M %p").ok()
}

/// Format a time of day the way the calendar shows it.
pub fn format_display_time(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}
