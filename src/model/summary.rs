use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-person visit totals over a date range. The grouping email stays
/// internal; it is not part of the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Anan K.",
    "employeeNo": "EMP-042",
    "district": "Bang Rak",
    "group": "BKK-1",
    "total": 12,
    "completed": 9,
    "incomplete": 1,
    "ongoing": 2
}))]
pub struct PersonSummary {
    pub name: String,
    pub employee_no: String,
    pub district: String,
    pub group: String,
    pub total: u32,
    pub completed: u32,
    pub incomplete: u32,
    pub ongoing: u32,
}
