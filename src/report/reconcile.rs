use std::collections::HashMap;
use std::collections::hash_map::Entry;

use anyhow::Result;
use serde::Deserialize;
use utoipa::IntoParams;

use super::directory::Directory;
use super::norm_key;
use super::schema::{CHECKIN_SCHEMA, CHECKOUT_SCHEMA};
use crate::config::Config;
use crate::model::activity::{ActivityRecord, ActivityStatus};
use crate::store::TableAdapter;
use crate::utils::{geo, timefmt};

/// Filters applied after reconciliation. Dates compare as inclusive
/// "YYYY-MM-DD" strings; person matches name or email, case-insensitive.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
pub struct ActivityFilter {
    /// Start of the date range (inclusive), "YYYY-MM-DD"
    pub from: Option<String>,
    /// End of the date range (inclusive), "YYYY-MM-DD"
    pub to: Option<String>,
    /// Substring match on name or email
    pub person: Option<String>,
    /// Substring match on district
    pub district: Option<String>,
}

impl ActivityFilter {
    pub fn date_range(from: Option<String>, to: Option<String>) -> Self {
        Self {
            from,
            to,
            ..Default::default()
        }
    }

    fn matches(&self, rec: &ActivityRecord) -> bool {
        if let Some(from) = &self.from {
            if !from.is_empty() && rec.date.as_str() < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if !to.is_empty() && rec.date.as_str() > to.as_str() {
                return false;
            }
        }
        if let Some(person) = &self.person {
            let needle = norm_key(person);
            if !needle.is_empty()
                && !norm_key(&rec.name).contains(&needle)
                && !norm_key(&rec.email).contains(&needle)
            {
                return false;
            }
        }
        if let Some(district) = &self.district {
            let needle = norm_key(district);
            if !needle.is_empty() && !norm_key(&rec.district).contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// (normalized email, UTC date, normalized location). The only join key
/// available: neither table carries a foreign key to its counterpart.
type JoinKey = (String, String, String);

fn join_key(email: &str, date: &str, location: &str) -> JoinKey {
    (
        norm_key(email),
        date.to_string(),
        norm_key(location),
    )
}

/// Join raw check-in and check-out rows into per-visit activity records.
///
/// Check-ins open drafts with status `ongoing`; checkouts complete a matching
/// draft or surface as standalone `incomplete` records (an orphan checkout is
/// a data-quality signal, not something to drop). A location typed slightly
/// differently on the two rows will not match: the pair stays visible as one
/// `ongoing` plus one `incomplete` record.
pub fn reconcile(
    checkin_headers: &[String],
    checkin_rows: &[Vec<String>],
    checkout_headers: &[String],
    checkout_rows: &[Vec<String>],
    directory: &Directory,
    filter: &ActivityFilter,
) -> Vec<ActivityRecord> {
    let in_cols = CHECKIN_SCHEMA.resolve(checkin_headers);
    let out_cols = CHECKOUT_SCHEMA.resolve(checkout_headers);

    let mut drafts: HashMap<JoinKey, ActivityRecord> = HashMap::new();

    for row in checkin_rows {
        let timestamp = in_cols.get(row, "timestamp");
        let email = in_cols.get(row, "email").trim();
        let location = in_cols.get(row, "location").trim();
        let date = timefmt::utc_date_of(timestamp);

        let mut rec = ActivityRecord {
            date: date.clone(),
            checkin_time: timefmt::utc_time_of(timestamp),
            location: location.to_string(),
            detail: in_cols.get(row, "detail").trim().to_string(),
            status: ActivityStatus::Ongoing,
            name: in_cols.get(row, "name").trim().to_string(),
            email: email.to_string(),
            district: in_cols.get(row, "district").trim().to_string(),
            group: in_cols.get(row, "group").trim().to_string(),
            image_in: in_cols.get(row, "image").trim().to_string(),
            checkin_gps: in_cols.get(row, "gps").trim().to_string(),
            ..Default::default()
        };
        if let Some((lat, lon)) = geo::parse_coordinate(&rec.checkin_gps) {
            rec.checkin_lat = Some(lat);
            rec.checkin_lon = Some(lon);
        }
        // a re-submitted check-in for the same visit overwrites the draft
        drafts.insert(join_key(email, &date, location), rec);
    }

    for row in checkout_rows {
        let timestamp = out_cols.get(row, "timestamp");
        let email = out_cols.get(row, "email").trim();
        let location = out_cols.get(row, "location").trim();
        let date = timefmt::utc_date_of(timestamp);

        let checkout_time = timefmt::utc_time_of(timestamp);
        let checkout_gps = out_cols.get(row, "gps").trim().to_string();
        let image_out = out_cols.get(row, "image").trim().to_string();
        let detail = out_cols.get(row, "detail").trim().to_string();

        match drafts.entry(join_key(email, &date, location)) {
            Entry::Occupied(mut occupied) => {
                let rec = occupied.get_mut();
                rec.checkout_time = checkout_time;
                rec.checkout_gps = checkout_gps;
                rec.image_out = image_out;
                if !detail.is_empty() {
                    if rec.detail.is_empty() {
                        rec.detail = detail;
                    } else if rec.detail != detail {
                        rec.detail.push_str("; ");
                        rec.detail.push_str(&detail);
                    }
                }
                super::fill(&mut rec.name, out_cols.get(row, "name"));
                super::fill(&mut rec.district, out_cols.get(row, "district"));
                super::fill(&mut rec.group, out_cols.get(row, "group"));
                // completed only when a check-in was ever recorded
                if rec.status != ActivityStatus::Incomplete {
                    rec.status = ActivityStatus::Completed;
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(ActivityRecord {
                    date,
                    checkout_time,
                    location: location.to_string(),
                    detail,
                    status: ActivityStatus::Incomplete,
                    name: out_cols.get(row, "name").trim().to_string(),
                    email: email.to_string(),
                    district: out_cols.get(row, "district").trim().to_string(),
                    group: out_cols.get(row, "group").trim().to_string(),
                    image_out,
                    checkout_gps,
                    ..Default::default()
                });
            }
        }
    }

    let mut records: Vec<ActivityRecord> = drafts.into_values().collect();

    for rec in &mut records {
        if let Some((lat, lon)) = geo::parse_coordinate(&rec.checkout_gps) {
            rec.checkout_lat = Some(lat);
            rec.checkout_lon = Some(lon);
        }
        if let (Some(a), Some(b)) = (rec.checkin_coord(), rec.checkout_coord()) {
            rec.distance_km = Some(geo::rounded_km(geo::distance_km(a, b)));
        }
        directory.backfill_activity(rec);
    }

    records.retain(|rec| filter.matches(rec));

    // date descending, then name ascending; email and location break the
    // remaining ties so the order is total
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| norm_key(&a.name).cmp(&norm_key(&b.name)))
            .then_with(|| norm_key(&a.email).cmp(&norm_key(&b.email)))
            .then_with(|| norm_key(&a.location).cmp(&norm_key(&b.location)))
    });
    records
}

/// Fetch the raw tables and reconcile. An upstream failure aborts the whole
/// query: a partial scan would misclassify ongoing/incomplete across the
/// board.
pub async fn fetch_reconciled(
    adapter: &TableAdapter,
    config: &Config,
    filter: &ActivityFilter,
) -> Result<(Vec<ActivityRecord>, Directory)> {
    let (in_headers, in_rows, out_headers, out_rows, user_headers, user_rows) = futures::try_join!(
        adapter.headers(&config.checkin_table),
        adapter.rows(&config.checkin_table),
        adapter.headers(&config.checkout_table),
        adapter.rows(&config.checkout_table),
        adapter.headers(&config.user_table),
        adapter.rows(&config.user_table),
    )?;

    let directory = Directory::from_table(&user_headers, &user_rows);
    let records = reconcile(
        &in_headers,
        &in_rows,
        &out_headers,
        &out_rows,
        &directory,
        filter,
    );
    Ok((records, directory))
}

pub async fn load_activities(
    adapter: &TableAdapter,
    config: &Config,
    filter: &ActivityFilter,
) -> Result<Vec<ActivityRecord>> {
    let (records, _) = fetch_reconciled(adapter, config, filter).await?;
    Ok(records)
}
