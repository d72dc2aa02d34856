use std::collections::HashMap;

use super::schema::USER_SCHEMA;
use super::{fill, norm_key};
use crate::model::activity::ActivityRecord;
use crate::model::directory::UserDirectoryEntry;
use crate::model::leave::LeaveRecord;

/// In-memory identity lookup built from the user directory table. Keys are
/// normalized employee numbers, emails/usernames and plain names. Rebuilt per
/// request; the workbook is the source of truth.
pub struct Directory {
    entries: Vec<UserDirectoryEntry>,
    index: HashMap<String, usize>,
}

impl Directory {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_table(headers: &[String], rows: &[Vec<String>]) -> Self {
        let cols = USER_SCHEMA.resolve(headers);
        let mut dir = Self::empty();
        for row in rows {
            let entry = UserDirectoryEntry {
                email: cols.get(row, "email").trim().to_string(),
                username: cols.get(row, "username").trim().to_string(),
                name: cols.get(row, "name").trim().to_string(),
                employee_no: cols.get(row, "employee_no").trim().to_string(),
                district: cols.get(row, "district").trim().to_string(),
                group: cols.get(row, "group").trim().to_string(),
                supervisor_email: cols.get(row, "supervisor_email").trim().to_string(),
                province: cols.get(row, "province").trim().to_string(),
                channel: cols.get(row, "channel").trim().to_string(),
                role: cols.get(row, "role").trim().to_string(),
            };
            let idx = dir.entries.len();
            for key in [
                &entry.employee_no,
                &entry.email,
                &entry.username,
                &entry.name,
            ] {
                let key = norm_key(key);
                if !key.is_empty() {
                    dir.index.entry(key).or_insert(idx);
                }
            }
            dir.entries.push(entry);
        }
        dir
    }

    /// Candidate keys are tried in order; the first one present wins.
    pub fn lookup<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&UserDirectoryEntry> {
        for candidate in candidates {
            let key = norm_key(candidate.as_ref());
            if key.is_empty() {
                continue;
            }
            if let Some(&idx) = self.index.get(&key) {
                return Some(&self.entries[idx]);
            }
        }
        None
    }

    /// Directory values fill gaps only; event-level data always wins.
    pub fn backfill_activity(&self, rec: &mut ActivityRecord) {
        let Some(entry) = self.lookup(&[&rec.email, &rec.name]) else {
            return;
        };
        fill(&mut rec.name, &entry.name);
        fill(&mut rec.district, &entry.district);
        fill(&mut rec.group, &entry.group);
    }

    pub fn backfill_leave(&self, rec: &mut LeaveRecord) {
        let Some(entry) = self.lookup(&[&rec.employee_no, &rec.email, &rec.name]) else {
            return;
        };
        fill(&mut rec.name, &entry.name);
        fill(&mut rec.employee_no, &entry.employee_no);
        fill(&mut rec.district, &entry.district);
        fill(&mut rec.group, &entry.group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Directory {
        let headers: Vec<String> = [
            "Email",
            "Username",
            "Name",
            "Employee_No",
            "District",
            "Group",
            "Supervisor_Email",
            "Province",
            "Channel",
            "Role",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let rows = vec![
            vec![
                "a@x.com", "a.x", "Anan K.", "EMP-042", "Bang Rak", "BKK-1", "sup@x.com",
                "Bangkok", "retail", "sales",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        ];
        Directory::from_table(&headers, &rows)
    }

    #[test]
    fn lookup_tries_candidates_in_order() {
        let dir = sample();
        assert!(dir.lookup(&["EMP-042"]).is_some());
        assert!(dir.lookup(&["", "A@X.COM"]).is_some());
        assert!(dir.lookup(&["anan k."]).is_some());
        assert!(dir.lookup(&["nobody@x.com", "EMP-999"]).is_none());
    }

    #[test]
    fn backfill_never_overwrites_event_values() {
        let dir = sample();
        let mut rec = ActivityRecord {
            email: "a@x.com".to_string(),
            district: "Sathorn".to_string(),
            ..Default::default()
        };
        dir.backfill_activity(&mut rec);
        // present value kept, gaps filled
        assert_eq!(rec.district, "Sathorn");
        assert_eq!(rec.name, "Anan K.");
        assert_eq!(rec.group, "BKK-1");
    }
}
