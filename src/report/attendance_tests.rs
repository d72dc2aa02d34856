use crate::model::activity::{ActivityRecord, ActivityStatus};
use crate::model::leave::LeaveRecord;
use crate::report::attendance::{aggregate_daily, AttendanceFilter};
use crate::report::directory::Directory;

fn visit(
    date: &str,
    email: &str,
    name: &str,
    location: &str,
    checkin_time: &str,
    checkout_time: &str,
) -> ActivityRecord {
    ActivityRecord {
        date: date.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        checkin_time: checkin_time.to_string(),
        checkout_time: checkout_time.to_string(),
        status: if checkout_time.is_empty() {
            ActivityStatus::Ongoing
        } else {
            ActivityStatus::Completed
        },
        ..Default::default()
    }
}

fn leave(date: &str, email: &str, leave_type: &str) -> LeaveRecord {
    LeaveRecord {
        date: date.to_string(),
        email: email.to_string(),
        leave_type: leave_type.to_string(),
        ..Default::default()
    }
}

fn run(activities: Vec<ActivityRecord>, leave_list: Vec<LeaveRecord>) -> Vec<crate::model::attendance::DailyAttendanceRow> {
    aggregate_daily(
        &activities,
        &leave_list,
        &Directory::empty(),
        &AttendanceFilter::default(),
    )
}

#[test]
fn first_checkin_is_the_minimum_and_last_checkout_the_maximum() {
    let rows = run(
        vec![
            visit("2025-06-16", "a@x.com", "Anan", "Store1", "09:00", "17:00"),
            visit("2025-06-16", "a@x.com", "Anan", "Store2", "08:30", "18:30"),
            visit("2025-06-16", "a@x.com", "Anan", "Store3", "10:00", "16:00"),
        ],
        vec![],
    );

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.first_checkin, "08:30");
    assert_eq!(row.first_location, "Store2");
    assert_eq!(row.last_checkout, "18:30");
    assert_eq!(row.last_location, "Store2");
    assert_eq!(row.location_count, 3);
}

#[test]
fn location_variants_count_once() {
    let rows = run(
        vec![
            visit("2025-06-16", "a@x.com", "Anan", "Store A", "09:00", ""),
            visit("2025-06-16", "a@x.com", "Anan", "store a ", "10:00", ""),
        ],
        vec![],
    );

    assert_eq!(rows[0].location_count, 1);
}

#[test]
fn dot_delimited_times_compare_like_colon_times() {
    let rows = run(
        vec![
            visit("2025-06-16", "a@x.com", "Anan", "Store1", "09.30", ""),
            visit("2025-06-16", "a@x.com", "Anan", "Store2", "09:45", ""),
        ],
        vec![],
    );

    assert_eq!(rows[0].first_checkin, "09.30");
}

#[test]
fn unparsable_times_never_win_first_or_last() {
    let rows = run(
        vec![
            visit("2025-06-16", "a@x.com", "Anan", "Store1", "late", "n/a"),
            visit("2025-06-16", "a@x.com", "Anan", "Store2", "09:00", "17:00"),
        ],
        vec![],
    );

    let row = &rows[0];
    assert_eq!(row.first_checkin, "09:00");
    assert_eq!(row.last_checkout, "17:00");
}

#[test]
fn non_maximal_records_backfill_empty_last_fields() {
    let mut early = visit("2025-06-16", "a@x.com", "Anan", "Store1", "08:00", "12:00");
    early.image_out = "photo-noon.jpg".to_string();
    // the later checkout carries no photo; the earlier one still fills the gap
    let late = visit("2025-06-16", "a@x.com", "Anan", "Store2", "13:00", "18:00");

    let rows = run(vec![late, early], vec![]);
    let row = &rows[0];
    assert_eq!(row.last_checkout, "18:00");
    assert_eq!(row.last_location, "Store2");
    assert_eq!(row.last_image, "photo-noon.jpg");
}

#[test]
fn leave_entries_fold_into_the_same_day_row() {
    let rows = run(
        vec![visit("2025-06-16", "a@x.com", "Anan", "Store1", "09:00", "")],
        vec![
            leave("2025-06-16", "a@x.com", "sick"),
            leave("2025-06-16", "a@x.com", "annual"),
        ],
    );

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].leave_note, "sick; annual");
}

#[test]
fn leave_only_days_still_produce_a_row() {
    let rows = run(vec![], vec![leave("2025-06-16", "a@x.com", "annual")]);

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.leave_note, "annual");
    assert_eq!(row.first_checkin, "");
    assert_eq!(row.location_count, 0);
}

#[test]
fn rows_sort_by_date_then_name() {
    let rows = run(
        vec![
            visit("2025-06-17", "a@x.com", "Anan", "Store1", "09:00", ""),
            visit("2025-06-16", "b@x.com", "Boonmee", "Store2", "09:00", ""),
            visit("2025-06-16", "a@x.com", "Anan", "Store1", "09:00", ""),
        ],
        vec![],
    );

    let order: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.date.as_str(), r.name.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("2025-06-16", "Anan"),
            ("2025-06-16", "Boonmee"),
            ("2025-06-17", "Anan"),
        ]
    );
}

#[test]
fn name_and_district_filters_apply_to_final_rows() {
    let mut anan = visit("2025-06-16", "a@x.com", "Anan", "Store1", "09:00", "");
    anan.district = "Bang Rak".to_string();
    let mut boonmee = visit("2025-06-16", "b@x.com", "Boonmee", "Store2", "09:00", "");
    boonmee.district = "Sathorn".to_string();

    let rows = aggregate_daily(
        &[anan, boonmee],
        &[],
        &Directory::empty(),
        &AttendanceFilter {
            district: Some("sathorn".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Boonmee");
}
