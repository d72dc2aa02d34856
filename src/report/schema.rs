//! Declared column layouts for the workbook tables.
//!
//! Headers are matched case-insensitively against the recognized aliases;
//! when a header is absent the declared fallback position is used and a
//! warning is logged, so legacy tables without full header rows keep working
//! without silent magic numbers.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

pub struct ColumnSpec {
    pub field: &'static str,
    pub aliases: &'static [&'static str],
    pub fallback: usize,
}

pub struct TableSchema {
    pub kind: &'static str,
    pub columns: Vec<ColumnSpec>,
}

fn col(field: &'static str, aliases: &'static [&'static str], fallback: usize) -> ColumnSpec {
    ColumnSpec {
        field,
        aliases,
        fallback,
    }
}

impl TableSchema {
    /// Resolve every declared column against the live header row.
    pub fn resolve(&self, headers: &[String]) -> ResolvedColumns {
        let mut index = HashMap::new();
        for column in &self.columns {
            let found = headers.iter().position(|h| {
                let h = h.trim();
                column.aliases.iter().any(|a| h.eq_ignore_ascii_case(a))
            });
            let idx = match found {
                Some(i) => i,
                None => {
                    warn!(
                        table = self.kind,
                        field = column.field,
                        fallback = column.fallback,
                        "column header not found, using declared fallback position"
                    );
                    column.fallback
                }
            };
            index.insert(column.field, idx);
        }
        ResolvedColumns { index }
    }
}

pub struct ResolvedColumns {
    index: HashMap<&'static str, usize>,
}

impl ResolvedColumns {
    /// Cell value for a logical field; empty when the row is short.
    pub fn get<'a>(&self, row: &'a [String], field: &str) -> &'a str {
        self.index
            .get(field)
            .and_then(|&i| row.get(i))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

pub static CHECKIN_SCHEMA: Lazy<TableSchema> = Lazy::new(|| TableSchema {
    kind: "checkin",
    columns: vec![
        col("id", &["id", "row_id"], 0),
        col("timestamp", &["timestamp", "checkin_time", "datetime"], 1),
        col("email", &["email", "username", "user"], 2),
        col("name", &["name", "full_name", "fullname"], 3),
        col("district", &["district", "area"], 4),
        col("group", &["group", "team"], 5),
        col("location", &["location", "location_name", "place", "store"], 6),
        col("gps", &["gps", "coordinates", "latlon"], 7),
        col("image", &["image", "photo", "image_url"], 8),
        col("detail", &["detail", "details", "note"], 9),
    ],
});

pub static CHECKOUT_SCHEMA: Lazy<TableSchema> = Lazy::new(|| TableSchema {
    kind: "checkout",
    columns: vec![
        col("id", &["id", "row_id"], 0),
        col("timestamp", &["timestamp", "checkout_time", "datetime"], 1),
        col("email", &["email", "username", "user"], 2),
        col("name", &["name", "full_name", "fullname"], 3),
        col("district", &["district", "area"], 4),
        col("group", &["group", "team"], 5),
        col("location", &["location", "location_name", "place", "store"], 6),
        col("gps", &["gps", "coordinates", "latlon"], 7),
        col("image", &["image", "photo", "image_url"], 8),
        // checkout rows carry their free text under varying labels
        col("detail", &["remark", "problem", "detail", "note"], 9),
    ],
});

pub static LEAVE_SCHEMA: Lazy<TableSchema> = Lazy::new(|| TableSchema {
    kind: "leave",
    columns: vec![
        col("id", &["id", "row_id"], 0),
        col("date", &["date", "leave_date"], 1),
        col("leave_type", &["leave_type", "type"], 2),
        col("reason", &["reason", "detail", "note"], 3),
        col("email", &["email", "username", "user"], 4),
        col("name", &["name", "full_name", "fullname"], 5),
        col("employee_no", &["employee_no", "employee_number", "emp_no"], 6),
        col("district", &["district", "area"], 7),
        col("group", &["group", "team"], 8),
    ],
});

pub static USER_SCHEMA: Lazy<TableSchema> = Lazy::new(|| TableSchema {
    kind: "users",
    columns: vec![
        col("email", &["email"], 0),
        col("username", &["username", "user"], 1),
        col("name", &["name", "full_name", "fullname"], 2),
        col("employee_no", &["employee_no", "employee_number", "emp_no"], 3),
        col("district", &["district", "area"], 4),
        col("group", &["group", "team"], 5),
        col(
            "supervisor_email",
            &["supervisor_email", "supervisor"],
            6,
        ),
        col("province", &["province"], 7),
        col("channel", &["channel"], 8),
        col("role", &["role"], 9),
    ],
});
