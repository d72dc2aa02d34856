use anyhow::Result;

use super::directory::Directory;
use super::schema::LEAVE_SCHEMA;
use crate::config::Config;
use crate::model::leave::LeaveRecord;
use crate::store::TableAdapter;

/// Parse leave table rows, keeping only dates inside the inclusive range.
pub fn leave_records(
    headers: &[String],
    rows: &[Vec<String>],
    from: Option<&str>,
    to: Option<&str>,
) -> Vec<LeaveRecord> {
    let cols = LEAVE_SCHEMA.resolve(headers);
    let mut records = Vec::new();
    for row in rows {
        let date = cols.get(row, "date").trim().to_string();
        if date.is_empty() {
            continue;
        }
        if let Some(from) = from {
            if !from.is_empty() && date.as_str() < from {
                continue;
            }
        }
        if let Some(to) = to {
            if !to.is_empty() && date.as_str() > to {
                continue;
            }
        }
        records.push(LeaveRecord {
            date,
            leave_type: cols.get(row, "leave_type").trim().to_string(),
            reason: cols.get(row, "reason").trim().to_string(),
            name: cols.get(row, "name").trim().to_string(),
            email: cols.get(row, "email").trim().to_string(),
            employee_no: cols.get(row, "employee_no").trim().to_string(),
            district: cols.get(row, "district").trim().to_string(),
            group: cols.get(row, "group").trim().to_string(),
        });
    }
    records
}

pub async fn load_leaves(
    adapter: &TableAdapter,
    config: &Config,
    from: Option<&str>,
    to: Option<&str>,
    directory: Option<&Directory>,
) -> Result<Vec<LeaveRecord>> {
    let (headers, rows) = futures::try_join!(
        adapter.headers(&config.leave_table),
        adapter.rows(&config.leave_table),
    )?;
    let mut records = leave_records(&headers, &rows, from, to);
    if let Some(directory) = directory {
        for rec in &mut records {
            directory.backfill_leave(rec);
        }
    }
    records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
    Ok(records)
}
