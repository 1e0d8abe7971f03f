use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check. The waste service is ready
/// as soon as it is serving; database connectivity is established before
/// the listener binds.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
