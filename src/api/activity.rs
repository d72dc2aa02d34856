use actix_web::{HttpResponse, Responder, web};

use crate::config::Config;
use crate::model::activity::ActivityRecord;
use crate::report::reconcile::{self, ActivityFilter};
use crate::store::TableAdapter;

/// Reconciled activity list
///
/// Rebuilt from the raw check-in and check-out tables on every call; nothing
/// is cached between requests beyond the header shapes.
#[utoipa::path(
    get,
    path = "/api/v1/activity",
    params(ActivityFilter),
    responses(
        (status = 200, description = "Reconciled activity records", body = [ActivityRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activity"
)]
pub async fn list_activities(
    adapter: web::Data<TableAdapter>,
    config: web::Data<Config>,
    query: web::Query<ActivityFilter>,
) -> actix_web::Result<impl Responder> {
    let records = reconcile::load_activities(&adapter, &config, &query)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to reconcile activities");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(records))
}
