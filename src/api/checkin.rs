use actix_web::{HttpResponse, Responder, web};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::model::activity::ActivityStatus;
use crate::report::reconcile::{self, ActivityFilter};
use crate::store::TableAdapter;
use crate::utils::geo;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckinPayload {
    #[schema(example = "a@x.com", format = "email", value_type = String)]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Anan K.")]
    pub name: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub group: String,
    #[schema(example = "Store1")]
    pub location: String,
    #[serde(default)]
    #[schema(example = "13.7563, 100.5018")]
    pub gps: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    #[schema(example = "a@x.com", format = "email", value_type = String)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub group: String,
    #[schema(example = "Store1")]
    pub location: String,
    #[serde(default)]
    #[schema(example = "13.7564, 100.5019")]
    pub gps: String,
    #[serde(default)]
    pub image: String,
    /// Free-text remark/problem note for the visit
    #[serde(default)]
    pub remark: String,
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/checkin",
    request_body = CheckinPayload,
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully",
            "dropped": []
        })),
        (status = 400, description = "Missing required fields", body = Object, example = json!({
            "message": "email and location are required"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-in"
)]
pub async fn check_in(
    adapter: web::Data<TableAdapter>,
    config: web::Data<Config>,
    payload: web::Json<CheckinPayload>,
) -> actix_web::Result<impl Responder> {
    if payload.email.trim().is_empty() || payload.location.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "email and location are required"
        })));
    }

    let fields = [
        ("id", Uuid::new_v4().to_string()),
        (
            "timestamp",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        ("email", payload.email.trim().to_string()),
        ("name", payload.name.trim().to_string()),
        ("district", payload.district.trim().to_string()),
        ("group", payload.group.trim().to_string()),
        ("location", payload.location.trim().to_string()),
        ("gps", payload.gps.trim().to_string()),
        ("image", payload.image.trim().to_string()),
        ("detail", payload.detail.trim().to_string()),
    ];

    let report = adapter
        .append_named(&config.checkin_table, &fields)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, email = %payload.email, "Check-in append failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Checked in successfully",
        "dropped": report.dropped
    })))
}

/// Check-out endpoint
///
/// Flags the checkout as out-of-area when its GPS fix drifted past the
/// configured radius from the day's matching check-in; the row is still
/// written either way.
#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    request_body = CheckoutPayload,
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully",
            "distanceKm": 0.018,
            "outOfArea": false,
            "dropped": []
        })),
        (status = 400, description = "Missing required fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Check-in"
)]
pub async fn check_out(
    adapter: web::Data<TableAdapter>,
    config: web::Data<Config>,
    payload: web::Json<CheckoutPayload>,
) -> actix_web::Result<impl Responder> {
    if payload.email.trim().is_empty() || payload.location.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "email and location are required"
        })));
    }

    let today = Utc::now().format("%Y-%m-%d").to_string();

    // today's ongoing visit at this location supplies the check-in fix
    let filter = ActivityFilter {
        from: Some(today.clone()),
        to: Some(today),
        person: Some(payload.email.trim().to_string()),
        district: None,
    };
    let activities = reconcile::load_activities(&adapter, &config, &filter)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, email = %payload.email, "Check-out reconcile failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let wanted = payload.location.trim().to_lowercase();
    let checkin_fix = activities
        .iter()
        .find(|rec| {
            rec.status == ActivityStatus::Ongoing && rec.location.trim().to_lowercase() == wanted
        })
        .and_then(|rec| rec.checkin_coord());

    let checkout_fix = geo::parse_coordinate(&payload.gps);
    let distance = match (checkin_fix, checkout_fix) {
        (Some(a), Some(b)) => Some(geo::distance_km(a, b)),
        _ => None,
    };
    let out_of_area = checkin_fix
        .zip(checkout_fix)
        .map(|(a, b)| geo::is_out_of_area(a, b, config.max_checkout_distance_km))
        .unwrap_or(false);

    let fields = [
        ("id", Uuid::new_v4().to_string()),
        (
            "timestamp",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        ("email", payload.email.trim().to_string()),
        ("name", payload.name.trim().to_string()),
        ("district", payload.district.trim().to_string()),
        ("group", payload.group.trim().to_string()),
        ("location", payload.location.trim().to_string()),
        ("gps", payload.gps.trim().to_string()),
        ("image", payload.image.trim().to_string()),
        ("remark", payload.remark.trim().to_string()),
    ];

    let report = adapter
        .append_named(&config.checkout_table, &fields)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, email = %payload.email, "Check-out append failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Checked out successfully",
        "distanceKm": distance.map(geo::rounded_km),
        "outOfArea": out_of_area,
        "dropped": report.dropped
    })))
}
