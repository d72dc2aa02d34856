use std::collections::HashMap;

use anyhow::Result;

use super::directory::Directory;
use super::reconcile::{self, ActivityFilter};
use super::{fill, identity_key, norm_key};
use crate::config::Config;
use crate::model::activity::{ActivityRecord, ActivityStatus};
use crate::model::summary::PersonSummary;
use crate::store::TableAdapter;

#[derive(Default)]
struct GroupAccum {
    email: String,
    summary: PersonSummary,
}

/// Fold reconciled activities into per-person totals. The grouping key is
/// email, falling back to employee number, name, then "unknown"; every
/// record lands in exactly one group. `total` always equals
/// `completed + incomplete + ongoing`.
pub fn summarize(activities: &[ActivityRecord], directory: &Directory) -> Vec<PersonSummary> {
    let mut groups: HashMap<String, GroupAccum> = HashMap::new();

    for rec in activities {
        let key = identity_key(&rec.email, "", &rec.name);
        let acc = groups.entry(key).or_default();

        fill(&mut acc.email, &rec.email);
        fill(&mut acc.summary.name, &rec.name);
        fill(&mut acc.summary.district, &rec.district);
        fill(&mut acc.summary.group, &rec.group);

        acc.summary.total += 1;
        match rec.status {
            ActivityStatus::Completed => acc.summary.completed += 1,
            ActivityStatus::Incomplete => acc.summary.incomplete += 1,
            ActivityStatus::Ongoing => acc.summary.ongoing += 1,
        }
    }

    let mut rows: Vec<PersonSummary> = groups
        .into_values()
        .map(|mut acc| {
            // the directory fills only what no contributing record carried
            let entry =
                directory.lookup(&[&acc.summary.employee_no, &acc.email, &acc.summary.name]);
            if let Some(entry) = entry {
                fill(&mut acc.summary.name, &entry.name);
                fill(&mut acc.summary.employee_no, &entry.employee_no);
                fill(&mut acc.summary.district, &entry.district);
                fill(&mut acc.summary.group, &entry.group);
            }
            // email was only the grouping key; it is not part of the payload
            acc.summary
        })
        .collect();

    rows.sort_by(|a, b| {
        norm_key(&a.name)
            .cmp(&norm_key(&b.name))
            .then_with(|| a.employee_no.cmp(&b.employee_no))
    });
    rows
}

pub async fn load_summary(
    adapter: &TableAdapter,
    config: &Config,
    filter: &ActivityFilter,
) -> Result<Vec<PersonSummary>> {
    let (activities, directory) = reconcile::fetch_reconciled(adapter, config, filter).await?;
    Ok(summarize(&activities, &directory))
}
