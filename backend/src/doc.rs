//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (service info,
//!   health, parcels, insights)
//! - **Schemas**: request and response bodies plus the domain error envelope
//! - **Security**: the `X-API-Key` header scheme required by parcel routes
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::insights::PotentialLevel;
use crate::domain::{Error, ErrorCode, ParcelStats};
use crate::inbound::http::api_key::API_KEY_HEADER;
use crate::inbound::http::insights::{
    DevelopmentPotentialResponse, RecommendationsResponse, RestrictionsResponse, ScoreResponse,
    SummaryResponse, ValueEstimateResponse, ZoningExplanationResponse,
};
use crate::inbound::http::parcels::{ParcelBody, ParcelUpdateBody};
use crate::inbound::http::service_info::{ServiceBanner, ServiceStatus};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme guarding parcel routes.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Enrich the generated document with the API key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            API_KEY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                API_KEY_HEADER,
                "Shared secret configured via SWISSPARCEL_API_KEY.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SwissParcel backend API",
        description = "Catalogue of Swiss land parcels with derived valuation and zoning insights."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKey" = [])),
    paths(
        crate::inbound::http::service_info::root,
        crate::inbound::http::service_info::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::parcels::list_parcels,
        crate::inbound::http::parcels::search_parcels,
        crate::inbound::http::parcels::parcel_stats,
        crate::inbound::http::parcels::get_parcel,
        crate::inbound::http::parcels::create_parcel,
        crate::inbound::http::parcels::update_parcel,
        crate::inbound::http::parcels::delete_parcel,
        crate::inbound::http::insights::parcel_score,
        crate::inbound::http::insights::parcel_summary,
        crate::inbound::http::insights::parcel_recommendations,
        crate::inbound::http::insights::parcel_zoning_explanation,
        crate::inbound::http::insights::parcel_value_estimate,
        crate::inbound::http::insights::parcel_development_potential,
        crate::inbound::http::insights::parcel_restrictions,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ParcelBody,
        ParcelUpdateBody,
        ParcelStats,
        PotentialLevel,
        ServiceBanner,
        ServiceStatus,
        ScoreResponse,
        SummaryResponse,
        RecommendationsResponse,
        ZoningExplanationResponse,
        ValueEstimateResponse,
        DevelopmentPotentialResponse,
        RestrictionsResponse,
    )),
    tags(
        (name = "service", description = "Service banner and status"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "parcels", description = "Parcel catalogue operations"),
        (name = "insights", description = "Derived metrics for a single parcel")
    )
)]
pub struct ApiDoc;
