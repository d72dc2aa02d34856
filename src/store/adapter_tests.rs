use std::sync::Arc;
use std::time::Duration;

use super::memory::MemoryStore;
use super::TableAdapter;

fn adapter_over(store: MemoryStore) -> (Arc<MemoryStore>, TableAdapter) {
    let store = Arc::new(store);
    let adapter = TableAdapter::new(store.clone(), Duration::from_secs(60));
    (store, adapter)
}

#[actix_web::test]
async fn append_named_maps_fields_case_insensitively() {
    let (store, adapter) = adapter_over(
        MemoryStore::new().with_table("CheckIn", &["ID", "Timestamp", "Email", "Location"], vec![]),
    );

    let report = adapter
        .append_named(
            "CheckIn",
            &[
                ("email", "a@x.com".to_string()),
                ("location", "Store1".to_string()),
            ],
        )
        .await
        .unwrap();

    assert_eq!(report.written, vec!["email", "location"]);
    assert!(report.dropped.is_empty());

    let rows = store.rows_of("CheckIn");
    assert_eq!(rows, vec![vec!["", "", "a@x.com", "Store1"]]);
}

#[actix_web::test]
async fn append_named_reports_unknown_fields_instead_of_dropping_silently() {
    let (store, adapter) =
        adapter_over(MemoryStore::new().with_table("CheckIn", &["Email", "Location"], vec![]));

    let report = adapter
        .append_named(
            "CheckIn",
            &[
                ("email", "a@x.com".to_string()),
                ("gsp", "13.7, 100.5".to_string()), // typo'd field name
            ],
        )
        .await
        .unwrap();

    assert_eq!(report.written, vec!["email"]);
    assert_eq!(report.dropped, vec!["gsp"]);
    // the row is still written with what matched
    assert_eq!(store.rows_of("CheckIn"), vec![vec!["a@x.com", ""]]);
}

#[actix_web::test]
async fn headers_are_served_from_cache_within_ttl() {
    let store = Arc::new(MemoryStore::new().with_table("Users", &["Email", "Name"], vec![]));
    let adapter = TableAdapter::new(store.clone(), Duration::from_secs(60));

    let first = adapter.headers("Users").await.unwrap();
    assert_eq!(first.as_slice(), ["Email", "Name"]);

    let again = adapter.headers("Users").await.unwrap();
    assert!(Arc::ptr_eq(&first, &again));
}

#[actix_web::test]
async fn missing_table_surfaces_as_error() {
    let (_, adapter) = adapter_over(MemoryStore::new());
    assert!(adapter.rows("NoSuchTable").await.is_err());
}
