//! Prometheus request metrics for the parcel API, built with `--features metrics`.
//!
//! `main` may fail to build a registry (for example on a duplicate
//! collector). The server still starts in that case, so [`ParcelMetrics`]
//! wraps an optional recorder and boxes response bodies either way, giving
//! `create_server` one app type for both outcomes.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;

type BoxedParcelService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

/// Request counters and latency histograms, or a body-boxing pass-through.
#[derive(Clone)]
pub(crate) struct ParcelMetrics(Option<Arc<PrometheusMetrics>>);

impl ParcelMetrics {
    #[must_use]
    pub(crate) fn new(recorder: Option<PrometheusMetrics>) -> Self {
        Self(recorder.map(Arc::new))
    }

    pub(crate) fn is_recording(&self) -> bool {
        self.0.is_some()
    }
}

impl<S, B> Transform<S, ServiceRequest> for ParcelMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedParcelService;
    type Future = LocalBoxFuture<'static, Result<BoxedParcelService, ()>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Some(recorder) = self.0.clone() else {
            let passthrough = service.map(ServiceResponse::map_into_boxed_body);
            return Box::pin(async move { Ok(boxed::service(passthrough)) });
        };
        let pending = Compat::new(PrometheusMetrics::clone(&recorder)).new_transform(service);
        Box::pin(async move { Ok(boxed::service(pending.await?)) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use actix_web_prom::PrometheusMetricsBuilder;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[actix_web::test]
    async fn missing_recorder_passes_requests_through() {
        let metrics = ParcelMetrics::new(None);
        assert!(!metrics.is_recording());
        let app = test::init_service(
            App::new()
                .wrap(metrics)
                .route("/parcels", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let parcels =
            test::call_service(&app, test::TestRequest::get().uri("/parcels").to_request()).await;
        assert_eq!(parcels.status(), StatusCode::OK);
        let scrape =
            test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert_eq!(scrape.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn recorder_counts_parcel_requests() {
        let recorder = PrometheusMetricsBuilder::new("parcel_test")
            .endpoint("/metrics")
            .build()
            .expect("registry builds");
        let metrics = ParcelMetrics::new(Some(recorder));
        assert!(metrics.is_recording());
        let app = test::init_service(
            App::new()
                .wrap(metrics)
                .route("/parcels", web::get().to(HttpResponse::Ok)),
        )
        .await;

        test::call_service(&app, test::TestRequest::get().uri("/parcels").to_request()).await;
        let scrape =
            test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert_eq!(scrape.status(), StatusCode::OK);
        let body = test::read_body(scrape).await;
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("parcel_test_http_requests_total"));
    }
}
