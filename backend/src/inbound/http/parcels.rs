//! Parcel catalogue handlers.
//!
//! ```text
//! GET    /parcels?skip=0&limit=10
//! GET    /parcels/search?canton=FR&buildable=true
//! GET    /parcels/stats
//! GET    /parcels/{id}
//! POST   /parcels {"id":"12345","canton":"FR",...}
//! PUT    /parcels/{id}
//! DELETE /parcels/{id}
//! ```
//!
//! Every route requires the `X-API-Key` header. `search` and `stats` must be
//! registered ahead of `{id}` so the literal segments win.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Parcel, ParcelFilter, ParcelInput, ParcelStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::api_key::Authorised;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_page, parse_parcel, parse_parcel_id};

/// Parcel as exchanged over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParcelBody {
    /// Unique parcel identifier.
    #[schema(example = "12345")]
    pub id: String,
    /// Canton short code.
    #[schema(example = "FR")]
    pub canton: String,
    /// Municipality name.
    #[schema(example = "Exampleville")]
    pub municipality: Option<String>,
    /// Surface in square metres; must be greater than zero.
    #[schema(example = 1200.0)]
    pub area_m2: f64,
    /// Zoning category, e.g. `buildable` or `agricultural`.
    #[schema(example = "buildable")]
    pub zoning: String,
    /// Whether construction is permitted.
    pub is_buildable: bool,
    /// Caller-supplied valuation in Swiss francs.
    #[schema(example = 250000.0)]
    pub estimated_value_chf: Option<f64>,
}

impl From<Parcel> for ParcelBody {
    fn from(value: Parcel) -> Self {
        let ParcelInput {
            id,
            canton,
            municipality,
            area_m2,
            zoning,
            is_buildable,
            estimated_value_chf,
        } = value.into();
        Self {
            id,
            canton,
            municipality,
            area_m2,
            zoning,
            is_buildable,
            estimated_value_chf,
        }
    }
}

impl From<ParcelBody> for ParcelInput {
    fn from(value: ParcelBody) -> Self {
        Self {
            id: value.id,
            canton: value.canton,
            municipality: value.municipality,
            area_m2: value.area_m2,
            zoning: value.zoning,
            is_buildable: value.is_buildable,
            estimated_value_chf: value.estimated_value_chf,
        }
    }
}

/// Request body for `PUT /parcels/{id}`.
///
/// The identifier is taken from the path; an `id` in the body is ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ParcelUpdateBody {
    /// Ignored; the stored identifier never changes.
    #[serde(default)]
    pub id: Option<String>,
    /// Canton short code.
    pub canton: String,
    /// Municipality name.
    pub municipality: Option<String>,
    /// Surface in square metres; must be greater than zero.
    pub area_m2: f64,
    /// Zoning category.
    pub zoning: String,
    /// Whether construction is permitted.
    pub is_buildable: bool,
    /// Caller-supplied valuation in Swiss francs.
    pub estimated_value_chf: Option<f64>,
}

impl ParcelUpdateBody {
    fn into_input(self, id: String) -> ParcelInput {
        ParcelInput {
            id,
            canton: self.canton,
            municipality: self.municipality,
            area_m2: self.area_m2,
            zoning: self.zoning,
            is_buildable: self.is_buildable,
            estimated_value_chf: self.estimated_value_chf,
        }
    }
}

/// Pagination window for `GET /parcels`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Number of parcels to skip. Defaults to 0.
    pub skip: Option<usize>,
    /// Maximum number of parcels to return. Defaults to 10; above 100 is rejected.
    pub limit: Option<usize>,
}

/// Filters for `GET /parcels/search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Canton code, matched case-insensitively.
    pub canton: Option<String>,
    /// Required buildable flag.
    pub buildable: Option<bool>,
}

impl From<SearchQuery> for ParcelFilter {
    fn from(value: SearchQuery) -> Self {
        Self {
            canton: value.canton.filter(|canton| !canton.trim().is_empty()),
            buildable: value.buildable,
        }
    }
}

fn bodies(parcels: Vec<Parcel>) -> Vec<ParcelBody> {
    parcels.into_iter().map(ParcelBody::from).collect()
}

/// List parcels in storage order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use swissparcel::inbound::http::parcels::list_parcels;
///
/// let app = App::new().service(list_parcels);
/// ```
#[utoipa::path(
    get,
    path = "/parcels",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of parcels", body = [ParcelBody]),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "listParcels"
)]
#[get("/parcels")]
pub async fn list_parcels(
    state: web::Data<HttpState>,
    _auth: Authorised,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<ParcelBody>>> {
    let ListQuery { skip, limit } = query.into_inner();
    let page = parse_page(skip, limit)?;
    let parcels = state.parcels.list(page).await?;
    Ok(web::Json(bodies(parcels)))
}

/// Search parcels by canton and buildable flag.
#[utoipa::path(
    get,
    path = "/parcels/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching parcels", body = [ParcelBody]),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 403, description = "Missing or invalid API key", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "searchParcels"
)]
#[get("/parcels/search")]
pub async fn search_parcels(
    state: web::Data<HttpState>,
    _auth: Authorised,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<ParcelBody>>> {
    let filter = ParcelFilter::from(query.into_inner());
    let parcels = state.parcels.search(&filter).await?;
    Ok(web::Json(bodies(parcels)))
}

/// Aggregate statistics over all parcels.
#[utoipa::path(
    get,
    path = "/parcels/stats",
    responses(
        (status = 200, description = "Collection statistics", body = ParcelStats),
        (status = 403, description = "Missing or invalid API key", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "parcelStats"
)]
#[get("/parcels/stats")]
pub async fn parcel_stats(
    state: web::Data<HttpState>,
    _auth: Authorised,
) -> ApiResult<web::Json<ParcelStats>> {
    Ok(web::Json(state.parcels.stats().await?))
}

/// Fetch one parcel.
#[utoipa::path(
    get,
    path = "/parcels/{id}",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Parcel", body = ParcelBody),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "getParcel"
)]
#[get("/parcels/{id}")]
pub async fn get_parcel(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
) -> ApiResult<web::Json<ParcelBody>> {
    let id = parse_parcel_id(path.into_inner())?;
    let parcel = state.parcels.get(&id).await?;
    Ok(web::Json(parcel.into()))
}

/// Create a parcel.
#[utoipa::path(
    post,
    path = "/parcels",
    request_body = ParcelBody,
    responses(
        (status = 201, description = "Parcel created", body = ParcelBody),
        (status = 400, description = "Invalid payload or duplicate id", body = Error),
        (status = 403, description = "Missing or invalid API key", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "createParcel"
)]
#[post("/parcels")]
pub async fn create_parcel(
    state: web::Data<HttpState>,
    _auth: Authorised,
    payload: web::Json<ParcelBody>,
) -> ApiResult<HttpResponse> {
    let parcel = parse_parcel(payload.into_inner().into())?;
    let created = state.parcel_commands.create(parcel).await?;
    Ok(HttpResponse::Created().json(ParcelBody::from(created)))
}

/// Replace every attribute of an existing parcel except its id.
#[utoipa::path(
    put,
    path = "/parcels/{id}",
    params(("id" = String, Path, description = "Parcel identifier")),
    request_body = ParcelUpdateBody,
    responses(
        (status = 200, description = "Parcel updated", body = ParcelBody),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "updateParcel"
)]
#[put("/parcels/{id}")]
pub async fn update_parcel(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
    payload: web::Json<ParcelUpdateBody>,
) -> ApiResult<web::Json<ParcelBody>> {
    let id = parse_parcel_id(path.into_inner())?;
    let parcel = parse_parcel(payload.into_inner().into_input(id.to_string()))?;
    let updated = state.parcel_commands.update(&id, parcel).await?;
    Ok(web::Json(updated.into()))
}

/// Delete a parcel.
#[utoipa::path(
    delete,
    path = "/parcels/{id}",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 204, description = "Parcel deleted"),
        (status = 403, description = "Missing or invalid API key", body = Error),
        (status = 404, description = "Parcel not found", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "deleteParcel"
)]
#[delete("/parcels/{id}")]
pub async fn delete_parcel(
    state: web::Data<HttpState>,
    _auth: Authorised,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_parcel_id(path.into_inner())?;
    state.parcel_commands.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
