use actix_web::{HttpResponse, Responder, web};
use serde_json::Value;

use crate::config::Config;
use crate::model::attendance::DailyAttendanceRow;
use crate::model::summary::PersonSummary;
use crate::report::attendance::{self, AttendanceFilter};
use crate::report::reconcile::ActivityFilter;
use crate::report::summary;
use crate::store::TableAdapter;

/// Daily attendance report
///
/// One row per person per day: earliest check-in, latest checkout, distinct
/// locations visited and the day's leave note.
#[utoipa::path(
    get,
    path = "/api/v1/reports/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Daily attendance rows", body = [DailyAttendanceRow]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn attendance_report(
    adapter: web::Data<TableAdapter>,
    config: web::Data<Config>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let rows = attendance::load_daily_attendance(&adapter, &config, &query)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build attendance report");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Person summary report
#[utoipa::path(
    get,
    path = "/api/v1/reports/summary",
    params(ActivityFilter),
    responses(
        (status = 200, description = "Per-person visit totals", body = [PersonSummary]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn summary_report(
    adapter: web::Data<TableAdapter>,
    config: web::Data<Config>,
    query: web::Query<ActivityFilter>,
) -> actix_web::Result<impl Responder> {
    let rows = summary::load_summary(&adapter, &config, &query)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build summary report");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Holiday table passthrough for the calendar views
#[utoipa::path(
    get,
    path = "/api/v1/holidays",
    responses(
        (status = 200, description = "Holiday rows keyed by column header", body = Object),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn list_holidays(
    adapter: web::Data<TableAdapter>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let (headers, rows) = futures::try_join!(
        adapter.headers(&config.holiday_table),
        adapter.rows(&config.holiday_table),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch holidays");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let list: Vec<Value> = rows
        .iter()
        .map(|row| {
            let mut obj = serde_json::Map::new();
            for (i, header) in headers.iter().enumerate() {
                obj.insert(
                    header.clone(),
                    Value::String(row.get(i).cloned().unwrap_or_default()),
                );
            }
            Value::Object(obj)
        })
        .collect();

    Ok(HttpResponse::Ok().json(list))
}
