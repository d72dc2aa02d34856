use crate::api::checkin::{CheckinPayload, CheckoutPayload};
use crate::api::leave::CreateLeave;
use crate::model::activity::{ActivityRecord, ActivityStatus};
use crate::model::attendance::DailyAttendanceRow;
use crate::model::leave::LeaveRecord;
use crate::model::summary::PersonSummary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Field Force Attendance API",
        version = "1.0.0",
        description = r#"
## Field Check-in / Check-out & Leave Tracking

This API powers a field attendance system for a sales-support workforce,
backed by a Microsoft Graph Excel workbook acting as the data store.

### 🔹 Key Features
- **Field Submissions**
  - GPS-stamped check-in and check-out at customer locations
  - Out-of-area flagging when a checkout drifts from its check-in fix
- **Activity Reconciliation**
  - Check-in and check-out rows joined into per-visit records with an
    ongoing / incomplete / completed lifecycle
- **Reports**
  - Daily attendance (first check-in, last checkout, locations visited)
  - Per-person visit summaries over a date range
- **Leave Tracking**
  - Leave submissions and a leave calendar merged into daily attendance

### 📦 Response Format
- JSON-based RESTful responses
- Text fields are always present (empty string, never null)

---
Built with **Rust**, **Actix Web**, and **Utoipa** over the Microsoft Graph workbook API.
"#,
    ),
    paths(
        crate::api::checkin::check_in,
        crate::api::checkin::check_out,

        crate::api::activity::list_activities,

        crate::api::reports::attendance_report,
        crate::api::reports::summary_report,
        crate::api::reports::list_holidays,

        crate::api::leave::create_leave,
        crate::api::leave::leave_list
    ),
    components(
        schemas(
            CheckinPayload,
            CheckoutPayload,
            CreateLeave,
            ActivityRecord,
            ActivityStatus,
            DailyAttendanceRow,
            PersonSummary,
            LeaveRecord
        )
    ),
    tags(
        (name = "Check-in", description = "Field check-in/check-out submissions"),
        (name = "Activity", description = "Reconciled per-visit activity records"),
        (name = "Reports", description = "Attendance and summary reports"),
        (name = "Leave", description = "Leave tracking APIs"),
    )
)]
pub struct ApiDoc;
