use std::time::Instant;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Histogram, TextEncoder, register_counter, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("realartist_requests_total", "Total number of requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "realartist_requests_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "realartist_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
}

/// Outermost middleware: counts every request, observes latency and logs a
/// line per request.
pub async fn track_requests(req: Request, next: Next) -> Response {
    REQUEST_TOTAL.inc();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    REQUEST_LATENCY.observe(elapsed.as_secs_f64());
    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "request"
    );

    response
}

// Prometheus text exposition
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    String::from_utf8_lossy(&buffer).into_owned().into_response()
}
