//! Shared validation helpers for inbound HTTP adapters.
//!
//! Payloads are validated here, at the boundary, so services only ever see
//! well-formed domain values. Failures become `invalid_request` errors whose
//! `details` name the offending field.

use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};
use serde_json::json;

use crate::domain::{Error, PageRequest, Parcel, ParcelId, ParcelInput, ParcelValidationError};

/// Largest `limit` accepted on `GET /parcels`.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Validation error codes for malformed HTTP requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MalformedJson,
    MalformedQuery,
    ParcelNotFound,
    LimitTooLarge,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedJson => "malformed_json",
            ErrorCode::MalformedQuery => "malformed_query",
            ErrorCode::ParcelNotFound => "parcel_not_found",
            ErrorCode::LimitTooLarge => "limit_too_large",
        }
    }
}

pub(crate) fn parcel_validation_error(err: ParcelValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

/// Validate a decoded payload into a domain parcel.
pub(crate) fn parse_parcel(input: ParcelInput) -> Result<Parcel, Error> {
    Parcel::try_new(input).map_err(parcel_validation_error)
}

/// Parse a path identifier.
///
/// No stored parcel can carry an invalid id, so a malformed one is reported
/// as a missing parcel rather than a bad request.
pub(crate) fn parse_parcel_id(raw: String) -> Result<ParcelId, Error> {
    ParcelId::new(raw.as_str()).map_err(|_| {
        Error::not_found(format!("parcel {raw} not found")).with_details(json!({
            "id": raw,
            "code": ErrorCode::ParcelNotFound.as_str(),
        }))
    })
}

/// Build the listing window, rejecting limits above [`MAX_PAGE_LIMIT`].
pub(crate) fn parse_page(skip: Option<usize>, limit: Option<usize>) -> Result<PageRequest, Error> {
    match limit {
        Some(limit) if limit > MAX_PAGE_LIMIT => Err(Error::invalid_request(format!(
            "limit must not exceed {MAX_PAGE_LIMIT}"
        ))
        .with_details(json!({
            "field": "limit",
            "code": ErrorCode::LimitTooLarge.as_str(),
            "max": MAX_PAGE_LIMIT,
        }))),
        _ => Ok(PageRequest::new(skip, limit)),
    }
}

fn malformed_json(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid JSON body: {err}"))
        .with_details(json!({ "code": ErrorCode::MalformedJson.as_str() }))
        .into()
}

fn malformed_query(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}"))
        .with_details(json!({ "code": ErrorCode::MalformedQuery.as_str() }))
        .into()
}

/// JSON extractor configuration emitting the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(malformed_json)
}

/// Query extractor configuration emitting the standard error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(malformed_query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    fn input() -> ParcelInput {
        ParcelInput {
            id: "12345".to_owned(),
            canton: "FR".to_owned(),
            municipality: None,
            area_m2: 1200.0,
            zoning: "buildable".to_owned(),
            is_buildable: true,
            estimated_value_chf: None,
        }
    }

    #[rstest]
    #[case(ParcelInput { area_m2: 0.0, ..input() }, "area_m2", "invalid_area")]
    #[case(ParcelInput { id: " ".to_owned(), ..input() }, "id", "empty_id")]
    #[case(ParcelInput { canton: String::new(), ..input() }, "canton", "empty_canton")]
    #[case(
        ParcelInput { estimated_value_chf: Some(-5.0), ..input() },
        "estimated_value_chf",
        "invalid_estimated_value"
    )]
    fn invalid_payloads_name_the_field(
        #[case] payload: ParcelInput,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = parse_parcel(payload).expect_err("payload is invalid");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], code);
    }

    #[rstest]
    fn valid_payload_becomes_a_parcel() {
        let parcel = parse_parcel(input()).expect("valid payload");
        assert_eq!(parcel.id().as_str(), "12345");
    }

    #[rstest]
    #[case(None, 10)]
    #[case(Some(0), 0)]
    #[case(Some(MAX_PAGE_LIMIT), MAX_PAGE_LIMIT)]
    fn accepted_limits_pass_through(#[case] limit: Option<usize>, #[case] expected: usize) {
        let page = parse_page(Some(3), limit).expect("limit accepted");
        assert_eq!(page.skip(), 3);
        assert_eq!(page.limit(), expected);
    }

    #[rstest]
    fn limits_above_the_maximum_are_rejected() {
        let err = parse_page(None, Some(MAX_PAGE_LIMIT + 1)).expect_err("limit too large");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "limit");
        assert_eq!(details["code"], "limit_too_large");
    }

    #[rstest]
    #[case(" 12345")]
    #[case("12345 ")]
    fn malformed_ids_read_as_missing(#[case] raw: &str) {
        let err = parse_parcel_id(raw.to_owned()).expect_err("id is invalid");
        assert_eq!(err.code(), DomainCode::NotFound);
        assert_eq!(
            err.details().and_then(|d| d.get("code")),
            Some(&json!("parcel_not_found"))
        );
    }
}
