use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::config::Config;
use crate::model::leave::LeaveRecord;
use crate::report::leaves;
use crate::store::TableAdapter;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeave {
    #[schema(example = "2025-06-16", format = "date", value_type = String)]
    pub date: String,
    #[schema(example = "sick")]
    pub leave_type: String,
    #[serde(default)]
    pub reason: String,
    #[schema(example = "a@x.com", format = "email", value_type = String)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub employee_no: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub group: String,
}

#[derive(Deserialize, IntoParams)]
pub struct LeaveQuery {
    /// Start of the date range (inclusive), "YYYY-MM-DD"
    pub from: Option<String>,
    /// End of the date range (inclusive), "YYYY-MM-DD"
    pub to: Option<String>,
}

/// Submit a leave entry
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body = CreateLeave,
    responses(
        (status = 200, description = "Leave recorded", body = Object, example = json!({
            "message": "Leave recorded",
            "dropped": []
        })),
        (status = 400, description = "Missing required fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    adapter: web::Data<TableAdapter>,
    config: web::Data<Config>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    if payload.date.trim().is_empty()
        || payload.leave_type.trim().is_empty()
        || payload.email.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "date, leaveType and email are required"
        })));
    }

    let fields = [
        ("id", Uuid::new_v4().to_string()),
        ("date", payload.date.trim().to_string()),
        ("leave_type", payload.leave_type.trim().to_string()),
        ("reason", payload.reason.trim().to_string()),
        ("email", payload.email.trim().to_string()),
        ("name", payload.name.trim().to_string()),
        ("employee_no", payload.employee_no.trim().to_string()),
        ("district", payload.district.trim().to_string()),
        ("group", payload.group.trim().to_string()),
    ];

    let report = adapter
        .append_named(&config.leave_table, &fields)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, email = %payload.email, "Failed to record leave");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave recorded",
        "dropped": report.dropped
    })))
}

/// Leave calendar
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveQuery),
    responses(
        (status = 200, description = "Leave records in the range", body = [LeaveRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    adapter: web::Data<TableAdapter>,
    config: web::Data<Config>,
    query: web::Query<LeaveQuery>,
) -> actix_web::Result<impl Responder> {
    let directory = leaves_directory(&adapter, &config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load user directory");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let records = leaves::load_leaves(
        &adapter,
        &config,
        query.from.as_deref(),
        query.to.as_deref(),
        Some(&directory),
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to list leaves");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(records))
}

async fn leaves_directory(
    adapter: &TableAdapter,
    config: &Config,
) -> anyhow::Result<crate::report::directory::Directory> {
    let (headers, rows) = futures::try_join!(
        adapter.headers(&config.user_table),
        adapter.rows(&config.user_table),
    )?;
    Ok(crate::report::directory::Directory::from_table(
        &headers, &rows,
    ))
}
