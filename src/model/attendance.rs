use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row per (date, person): earliest check-in and latest checkout of the
/// day across possibly multiple visits, plus the day's leave note. Computed,
/// transient, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendanceRow {
    #[schema(example = "2025-06-16")]
    pub date: String,
    pub name: String,
    pub email: String,
    pub employee_no: String,
    pub district: String,
    pub group: String,
    /// Earliest check-in of the day ("HH:MM") with its origin fields.
    #[schema(example = "08:30")]
    pub first_checkin: String,
    pub first_location: String,
    pub first_image: String,
    pub first_gps: String,
    /// Latest checkout of the day ("HH:MM") with its origin fields.
    #[schema(example = "18:30")]
    pub last_checkout: String,
    pub last_location: String,
    pub last_image: String,
    pub last_gps: String,
    /// Distinct locations visited that day (case/whitespace folded).
    #[schema(example = 3)]
    pub location_count: u32,
    /// Leave-type labels for the day, "; "-joined when several apply.
    #[schema(example = "sick")]
    pub leave_note: String,
}
