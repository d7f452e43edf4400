mod cleanse;
mod health;
mod summary;

use actix_web::web;

/// Register every route under its scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health).service(
        web::scope("/text-tools")
            .service(cleanse::submit_cleanse)
            .service(cleanse::cleanse_status)
            .service(cleanse::cleanse_result)
            .service(summary::short_summary)
            .service(summary::long_summary)
            .service(summary::structured_summary)
            .service(summary::build_summary)
            .service(summary::major_incident_communication)
            .service(summary::telemetry_summary),
    );
}
