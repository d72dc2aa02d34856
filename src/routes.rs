use crate::{
    api::{activity, checkin, leave, reports},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let submit_limiter = Arc::new(build_limiter(config.rate_submit_per_min));
    let report_limiter = Arc::new(build_limiter(config.rate_report_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            // field submissions
            .service(
                web::resource("/checkin")
                    .wrap(submit_limiter.clone())
                    .route(web::post().to(checkin::check_in)),
            )
            .service(
                web::resource("/checkout")
                    .wrap(submit_limiter.clone())
                    .route(web::post().to(checkin::check_out)),
            )
            // reconciled views
            .service(
                web::resource("/activity")
                    .wrap(report_limiter.clone())
                    .route(web::get().to(activity::list_activities)),
            )
            .service(
                web::scope("/reports")
                    .wrap(report_limiter.clone())
                    // /reports/attendance
                    .service(
                        web::resource("/attendance")
                            .route(web::get().to(reports::attendance_report)),
                    )
                    // /reports/summary
                    .service(
                        web::resource("/summary").route(web::get().to(reports::summary_report)),
                    ),
            )
            // leave calendar
            .service(
                web::resource("/leave")
                    .wrap(submit_limiter.clone())
                    .route(web::post().to(leave::create_leave))
                    .route(web::get().to(leave::leave_list)),
            )
            .service(
                web::resource("/holidays")
                    .wrap(report_limiter.clone())
                    .route(web::get().to(reports::list_holidays)),
            ),
    );
}
