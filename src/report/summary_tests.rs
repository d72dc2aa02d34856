use crate::model::activity::{ActivityRecord, ActivityStatus};
use crate::report::directory::Directory;
use crate::report::summary::summarize;

fn record(email: &str, name: &str, status: ActivityStatus) -> ActivityRecord {
    ActivityRecord {
        date: "2025-06-16".to_string(),
        email: email.to_string(),
        name: name.to_string(),
        location: "Store1".to_string(),
        status,
        ..Default::default()
    }
}

#[test]
fn counters_always_sum_to_total() {
    let activities = vec![
        record("a@x.com", "Anan", ActivityStatus::Completed),
        record("a@x.com", "Anan", ActivityStatus::Completed),
        record("a@x.com", "Anan", ActivityStatus::Ongoing),
        record("b@x.com", "Boonmee", ActivityStatus::Incomplete),
        record("b@x.com", "Boonmee", ActivityStatus::Ongoing),
        record("", "", ActivityStatus::Ongoing),
    ];

    let rows = summarize(&activities, &Directory::empty());
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.total, row.completed + row.incomplete + row.ongoing);
    }
}

#[test]
fn grouping_falls_back_from_email_to_name_to_unknown() {
    let activities = vec![
        record("a@x.com", "Anan", ActivityStatus::Ongoing),
        record("A@X.COM ", "Anan", ActivityStatus::Ongoing), // same person, noisy email
        record("", "Boonmee", ActivityStatus::Ongoing),      // name-keyed
        record("", "", ActivityStatus::Ongoing),             // lands in "unknown"
    ];

    let rows = summarize(&activities, &Directory::empty());
    assert_eq!(rows.len(), 3);
    let anan = rows.iter().find(|r| r.name == "Anan").unwrap();
    assert_eq!(anan.total, 2);
}

#[test]
fn directory_fills_only_groups_with_no_event_value() {
    let user_headers: Vec<String> = [
        "Email", "Username", "Name", "Employee_No", "District", "Group", "Supervisor_Email",
        "Province", "Channel", "Role",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let user_rows = vec![vec![
        "a@x.com", "", "Anan K.", "EMP-042", "Bang Rak", "BKK-1", "", "", "", "",
    ]
    .into_iter()
    .map(String::from)
    .collect()];
    let directory = Directory::from_table(&user_headers, &user_rows);

    let mut with_district = record("a@x.com", "", ActivityStatus::Ongoing);
    with_district.district = "Sathorn".to_string();

    let rows = summarize(&[with_district], &directory);
    let row = &rows[0];
    assert_eq!(row.district, "Sathorn"); // carried by a contributing record
    assert_eq!(row.name, "Anan K."); // absent on every record, directory fills
    assert_eq!(row.employee_no, "EMP-042");
}

#[test]
fn email_is_not_part_of_the_payload() {
    let rows = summarize(
        &[record("a@x.com", "Anan", ActivityStatus::Ongoing)],
        &Directory::empty(),
    );

    let payload = serde_json::to_value(&rows[0]).unwrap();
    assert!(payload.get("email").is_none());
    assert!(payload.get("name").is_some());
}
