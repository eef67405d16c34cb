//! Derived read-only views over a single parcel.
//!
//! Each handler resolves the parcel first, so an unknown id yields `404`
//! before any formula runs. Responses always echo the `parcel_id`.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::insights::{self, PotentialLevel};
use crate::domain::{Error, Parcel};
use crate::inbound::http::ApiResult;
use crate::inbound::http::api_key::Authorised;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_parcel_id;

/// Body of `GET /parcels/{id}/score`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreResponse {
    /// Parcel identifier.
    pub parcel_id: String,
    /// Score between 75 and 100.
    #[schema(example = 100)]
    pub score: u32,
}

/// Body of `GET /parcels/{id}/summary`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    /// Parcel identifier.
    pub parcel_id: String,
    /// One-sentence description.
    pub summary: String,
}

/// Body of `GET /parcels/{id}/recommendations`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationsResponse {
    /// Parcel identifier.
    pub parcel_id: String,
    /// Suggested next steps.
    pub recommendations: Vec<String>,
}

/// Body of `GET /parcels/{id}/zoning-explanation`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ZoningExplanationResponse {
    /// Parcel identifier.
    pub parcel_id: String,
    /// Zoning category as stored.
    pub zoning: String,
    /// Plain-language meaning of the zoning.
    pub explanation: String,
}

/// Body of `GET /parcels/{id}/value-estimate`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValueEstimateResponse {
    /// Parcel identifier.
    pub parcel_id: String,
    /// Formula-based value in Swiss francs.
    #[schema(example = 1200000.0)]
    pub estimated_value_chf: f64,
    /// Formula used.
    pub method: String,
}

/// Body of `GET /parcels/{id}/development-potential`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DevelopmentPotentialResponse {
    /// Parcel identifier.
    pub parcel_id: String,
    /// Qualitative rating.
    pub potential: PotentialLevel,
    /// Suggested use.
    pub highest_best_use: String,
}

/// Body of `GET /parcels/{id}/restrictions`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestrictionsResponse {
    /// Parcel identifier.
    pub parcel_id: String,
    /// Applicable constraints.
    pub restrictions: Vec<String>,
}

async fn load(state: &HttpState, raw_id: String) -> Result<Parcel, Error> {
    let id = parse_parcel_id(raw_id)?;
    state.parcels.get(&id).await
}

/// Heuristic attractiveness score.
#[utoipa::path(
    get,
    path = "/parcels/{id}/score",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Score", body = ScoreResponse),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["insights"],
    operation_id = "parcelScore"
)]
#[get("/parcels/{id}/score")]
pub async fn parcel_score(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
) -> ApiResult<web::Json<ScoreResponse>> {
    let parcel = load(&state, path.into_inner()).await?;
    Ok(web::Json(ScoreResponse {
        parcel_id: parcel.id().to_string(),
        score: insights::score(&parcel),
    }))
}

/// One-sentence description.
#[utoipa::path(
    get,
    path = "/parcels/{id}/summary",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Summary", body = SummaryResponse),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["insights"],
    operation_id = "parcelSummary"
)]
#[get("/parcels/{id}/summary")]
pub async fn parcel_summary(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
) -> ApiResult<web::Json<SummaryResponse>> {
    let parcel = load(&state, path.into_inner()).await?;
    Ok(web::Json(SummaryResponse {
        parcel_id: parcel.id().to_string(),
        summary: insights::summary(&parcel),
    }))
}

/// Recommended next step.
#[utoipa::path(
    get,
    path = "/parcels/{id}/recommendations",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Recommendations", body = RecommendationsResponse),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["insights"],
    operation_id = "parcelRecommendations"
)]
#[get("/parcels/{id}/recommendations")]
pub async fn parcel_recommendations(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecommendationsResponse>> {
    let parcel = load(&state, path.into_inner()).await?;
    Ok(web::Json(RecommendationsResponse {
        parcel_id: parcel.id().to_string(),
        recommendations: insights::recommendations(&parcel),
    }))
}

/// Explain the zoning category.
#[utoipa::path(
    get,
    path = "/parcels/{id}/zoning-explanation",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Zoning explanation", body = ZoningExplanationResponse),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["insights"],
    operation_id = "parcelZoningExplanation"
)]
#[get("/parcels/{id}/zoning-explanation")]
pub async fn parcel_zoning_explanation(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
) -> ApiResult<web::Json<ZoningExplanationResponse>> {
    let parcel = load(&state, path.into_inner()).await?;
    Ok(web::Json(ZoningExplanationResponse {
        parcel_id: parcel.id().to_string(),
        zoning: parcel.zoning().to_owned(),
        explanation: insights::zoning_explanation(&parcel),
    }))
}

/// Formula-based valuation.
#[utoipa::path(
    get,
    path = "/parcels/{id}/value-estimate",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Value estimate", body = ValueEstimateResponse),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["insights"],
    operation_id = "parcelValueEstimate"
)]
#[get("/parcels/{id}/value-estimate")]
pub async fn parcel_value_estimate(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
) -> ApiResult<web::Json<ValueEstimateResponse>> {
    let parcel = load(&state, path.into_inner()).await?;
    let estimate = insights::value_estimate(&parcel);
    Ok(web::Json(ValueEstimateResponse {
        parcel_id: parcel.id().to_string(),
        estimated_value_chf: estimate.estimated_value_chf,
        method: estimate.method.to_owned(),
    }))
}

/// Qualitative development potential.
#[utoipa::path(
    get,
    path = "/parcels/{id}/development-potential",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Development potential", body = DevelopmentPotentialResponse),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["insights"],
    operation_id = "parcelDevelopmentPotential"
)]
#[get("/parcels/{id}/development-potential")]
pub async fn parcel_development_potential(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
) -> ApiResult<web::Json<DevelopmentPotentialResponse>> {
    let parcel = load(&state, path.into_inner()).await?;
    let rating = insights::development_potential(&parcel);
    Ok(web::Json(DevelopmentPotentialResponse {
        parcel_id: parcel.id().to_string(),
        potential: rating.potential,
        highest_best_use: rating.highest_best_use.to_owned(),
    }))
}

/// Regulatory constraints.
#[utoipa::path(
    get,
    path = "/parcels/{id}/restrictions",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Restrictions", body = RestrictionsResponse),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["insights"],
    operation_id = "parcelRestrictions"
)]
#[get("/parcels/{id}/restrictions")]
pub async fn parcel_restrictions(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
) -> ApiResult<web::Json<RestrictionsResponse>> {
    let parcel = load(&state, path.into_inner()).await?;
    Ok(web::Json(RestrictionsResponse {
        parcel_id: parcel.id().to_string(),
        restrictions: insights::restrictions(&parcel),
    }))
}
