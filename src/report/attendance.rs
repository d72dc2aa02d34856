use std::collections::{HashMap, HashSet};

use anyhow::Result;
use serde::Deserialize;
use utoipa::IntoParams;

use super::directory::Directory;
use super::reconcile::{self, ActivityFilter};
use super::{fill, identity_key, leaves, norm_key};
use crate::config::Config;
use crate::model::activity::ActivityRecord;
use crate::model::attendance::DailyAttendanceRow;
use crate::model::leave::LeaveRecord;
use crate::store::TableAdapter;
use crate::utils::timefmt;

/// Sentinels: an unparsable or missing time never wins a first/last
/// comparison.
const NO_CHECKIN: u32 = u32::MAX;
const NO_CHECKOUT: i64 = -1;

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
pub struct AttendanceFilter {
    /// Start of the date range (inclusive), "YYYY-MM-DD"
    pub from: Option<String>,
    /// End of the date range (inclusive), "YYYY-MM-DD"
    pub to: Option<String>,
    /// Substring match on name
    pub name: Option<String>,
    /// Substring match on district
    pub district: Option<String>,
}

struct DayAccum {
    row: DailyAttendanceRow,
    first_minute: u32,
    last_minute: i64,
    locations: HashSet<String>,
}

impl DayAccum {
    fn new(date: &str) -> Self {
        Self {
            row: DailyAttendanceRow {
                date: date.to_string(),
                ..Default::default()
            },
            first_minute: NO_CHECKIN,
            last_minute: NO_CHECKOUT,
            locations: HashSet::new(),
        }
    }
}

/// Fold reconciled activities and leave records into one row per
/// (date, person): earliest check-in, latest checkout, distinct-location
/// count and the day's leave note.
pub fn aggregate_daily(
    activities: &[ActivityRecord],
    leave_list: &[LeaveRecord],
    directory: &Directory,
    filter: &AttendanceFilter,
) -> Vec<DailyAttendanceRow> {
    let mut days: HashMap<(String, String), DayAccum> = HashMap::new();

    for rec in activities {
        let key = (
            rec.date.clone(),
            identity_key(&rec.email, "", &rec.name),
        );
        let acc = days.entry(key).or_insert_with(|| DayAccum::new(&rec.date));

        fill(&mut acc.row.name, &rec.name);
        fill(&mut acc.row.email, &rec.email);
        fill(&mut acc.row.district, &rec.district);
        fill(&mut acc.row.group, &rec.group);

        // earliest check-in wins; ties keep the first seen
        let checkin_minute = timefmt::minute_of_day(&rec.checkin_time).unwrap_or(NO_CHECKIN);
        if checkin_minute < acc.first_minute {
            acc.first_minute = checkin_minute;
            acc.row.first_checkin = rec.checkin_time.clone();
            acc.row.first_location = rec.location.clone();
            acc.row.first_image = rec.image_in.clone();
            acc.row.first_gps = rec.checkin_gps.clone();
        }

        // latest checkout wins outright; non-maximal records still backfill
        // any field left empty so the row never shows blanks when data exists
        let checkout_minute = timefmt::minute_of_day(&rec.checkout_time)
            .map(i64::from)
            .unwrap_or(NO_CHECKOUT);
        if checkout_minute > acc.last_minute {
            acc.last_minute = checkout_minute;
            acc.row.last_checkout = rec.checkout_time.clone();
            acc.row.last_location = rec.location.clone();
            acc.row.last_image = rec.image_out.clone();
            acc.row.last_gps = rec.checkout_gps.clone();
        } else {
            fill(&mut acc.row.last_checkout, &rec.checkout_time);
            fill(&mut acc.row.last_location, &rec.location);
            fill(&mut acc.row.last_image, &rec.image_out);
            fill(&mut acc.row.last_gps, &rec.checkout_gps);
        }

        let location = norm_key(&rec.location);
        if !location.is_empty() {
            acc.locations.insert(location);
        }
    }

    for leave in leave_list {
        let key = (
            leave.date.clone(),
            identity_key(&leave.email, &leave.employee_no, &leave.name),
        );
        let acc = days
            .entry(key)
            .or_insert_with(|| DayAccum::new(&leave.date));

        fill(&mut acc.row.name, &leave.name);
        fill(&mut acc.row.email, &leave.email);
        fill(&mut acc.row.employee_no, &leave.employee_no);
        fill(&mut acc.row.district, &leave.district);
        fill(&mut acc.row.group, &leave.group);

        let label = leave.leave_type.trim();
        if !label.is_empty() {
            if acc.row.leave_note.is_empty() {
                acc.row.leave_note = label.to_string();
            } else {
                acc.row.leave_note.push_str("; ");
                acc.row.leave_note.push_str(label);
            }
        }
    }

    let mut rows: Vec<DailyAttendanceRow> = days
        .into_values()
        .map(|mut acc| {
            acc.row.location_count = acc.locations.len() as u32;
            // activities carry no employee number; the directory supplies it
            let entry = directory.lookup(&[&acc.row.employee_no, &acc.row.email, &acc.row.name]);
            if let Some(entry) = entry {
                fill(&mut acc.row.name, &entry.name);
                fill(&mut acc.row.employee_no, &entry.employee_no);
                fill(&mut acc.row.district, &entry.district);
                fill(&mut acc.row.group, &entry.group);
            }
            acc.row
        })
        .collect();

    rows.retain(|row| {
        if let Some(name) = &filter.name {
            let needle = norm_key(name);
            if !needle.is_empty() && !norm_key(&row.name).contains(&needle) {
                return false;
            }
        }
        if let Some(district) = &filter.district {
            let needle = norm_key(district);
            if !needle.is_empty() && !norm_key(&row.district).contains(&needle) {
                return false;
            }
        }
        true
    });

    rows.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| norm_key(&a.name).cmp(&norm_key(&b.name)))
            .then_with(|| a.employee_no.cmp(&b.employee_no))
            .then_with(|| norm_key(&a.email).cmp(&norm_key(&b.email)))
    });
    rows
}

pub async fn load_daily_attendance(
    adapter: &TableAdapter,
    config: &Config,
    filter: &AttendanceFilter,
) -> Result<Vec<DailyAttendanceRow>> {
    let range = ActivityFilter::date_range(filter.from.clone(), filter.to.clone());
    let ((activities, directory), leave_list) = futures::try_join!(
        reconcile::fetch_reconciled(adapter, config, &range),
        leaves::load_leaves(
            adapter,
            config,
            filter.from.as_deref(),
            filter.to.as_deref(),
            None,
        ),
    )?;
    Ok(aggregate_daily(&activities, &leave_list, &directory, filter))
}
