use hyper::StatusCode;
use tracing::instrument;

/// Liveness endpoint for load balancers; never touches the search API or the downloader.
#[instrument(name = "Liveness check", ret)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
