//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod api_key;
pub mod error;
pub mod health;
pub mod insights;
pub mod parcels;
pub mod service_info;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every REST route together with the extractor configuration that
/// turns malformed bodies and query strings into error envelopes.
///
/// Literal parcel routes (`search`, `stats`) are registered before the
/// `{id}` matcher. Health probes need a `web::Data<HealthState>` and parcel
/// routes a `web::Data<HttpState>` registered by the caller.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use swissparcel::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(service_info::root)
        .service(service_info::status)
        .service(health::ready)
        .service(health::live)
        .service(parcels::search_parcels)
        .service(parcels::parcel_stats)
        .service(parcels::list_parcels)
        .service(parcels::create_parcel)
        .service(parcels::get_parcel)
        .service(parcels::update_parcel)
        .service(parcels::delete_parcel)
        .service(insights::parcel_score)
        .service(insights::parcel_summary)
        .service(insights::parcel_recommendations)
        .service(insights::parcel_zoning_explanation)
        .service(insights::parcel_value_estimate)
        .service(insights::parcel_development_potential)
        .service(insights::parcel_restrictions);
}
