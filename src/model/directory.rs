use serde::{Deserialize, Serialize};

/// One row of the user directory table. Event rows are primary; these values
/// only fill gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDirectoryEntry {
    pub email: String,
    pub username: String,
    pub name: String,
    pub employee_no: String,
    pub district: String,
    pub group: String,
    pub supervisor_email: String,
    pub province: String,
    pub channel: String,
    pub role: String,
}
