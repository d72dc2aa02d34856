use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One leave entry for one person on one date, read from the leave table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    #[schema(example = "2025-06-16")]
    pub date: String,
    #[schema(example = "sick")]
    pub leave_type: String,
    pub reason: String,
    pub name: String,
    pub email: String,
    pub employee_no: String,
    pub district: String,
    pub group: String,
}
