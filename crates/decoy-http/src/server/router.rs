//! Route dispatch: admin API under the configured prefix, stub traffic
//! everywhere else.

use super::handlers::{history, primings, system};
use super::state::ServerState;
use super::stub_handler::handle_stub_request;
use super::types::not_found;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

/// Parsed admin endpoint, relative to the admin prefix
#[derive(Debug, PartialEq, Eq)]
enum AdminRoute {
    /// GET/POST /primings
    Primings,
    /// POST /primings/default
    DefaultPrimings,
    /// GET/DELETE /history
    History,
    /// GET /failed-requests
    FailedRequests,
    /// POST /verify
    Verify,
    /// POST /reset
    Reset,
    /// GET /health
    Health,
    /// GET /metrics
    Metrics,
}

impl AdminRoute {
    fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["primings"] => Some(AdminRoute::Primings),
            ["primings", "default"] => Some(AdminRoute::DefaultPrimings),
            ["history"] => Some(AdminRoute::History),
            ["failed-requests"] => Some(AdminRoute::FailedRequests),
            ["verify"] => Some(AdminRoute::Verify),
            ["reset"] => Some(AdminRoute::Reset),
            ["health"] => Some(AdminRoute::Health),
            ["metrics"] => Some(AdminRoute::Metrics),
            _ => None,
        }
    }
}

/// Main request router
pub async fn route_request(
    req: Request<Incoming>,
    state: Arc<ServerState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();

    let Some(admin_path) = state.admin_path(&path) else {
        return Ok(handle_stub_request(req, &state).await);
    };

    let method = req.method().clone();
    debug!("Admin API: {} {}", method, path);

    let Some(route) = AdminRoute::parse(admin_path) else {
        return Ok(not_found());
    };

    let engine = &state.engine;
    let response = match (&method, route) {
        (&Method::GET, AdminRoute::Primings) => primings::handle_list(engine),
        (&Method::POST, AdminRoute::Primings) => primings::handle_add(req, engine).await,
        (&Method::POST, AdminRoute::DefaultPrimings) => {
            primings::handle_add_default(req, engine).await
        }

        (&Method::GET, AdminRoute::History) => history::handle_get(engine),
        (&Method::DELETE, AdminRoute::History) => history::handle_clear(engine),
        (&Method::GET, AdminRoute::FailedRequests) => history::handle_failed_requests(engine),
        (&Method::POST, AdminRoute::Verify) => history::handle_verify(req, engine).await,

        (&Method::POST, AdminRoute::Reset) => system::handle_reset(engine),
        (&Method::GET, AdminRoute::Health) => system::handle_health(),
        (&Method::GET, AdminRoute::Metrics) => system::handle_metrics(),

        _ => not_found(),
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_route_parse() {
        assert_eq!(AdminRoute::parse("/primings"), Some(AdminRoute::Primings));
        assert_eq!(AdminRoute::parse("/primings/"), Some(AdminRoute::Primings));
        assert_eq!(
            AdminRoute::parse("/primings/default"),
            Some(AdminRoute::DefaultPrimings)
        );
        assert_eq!(AdminRoute::parse("/history"), Some(AdminRoute::History));
        assert_eq!(
            AdminRoute::parse("/failed-requests"),
            Some(AdminRoute::FailedRequests)
        );
        assert_eq!(AdminRoute::parse("/verify"), Some(AdminRoute::Verify));
        assert_eq!(AdminRoute::parse("/reset"), Some(AdminRoute::Reset));
        assert_eq!(AdminRoute::parse("/health"), Some(AdminRoute::Health));
        assert_eq!(AdminRoute::parse("/metrics"), Some(AdminRoute::Metrics));

        // Invalid routes
        assert_eq!(AdminRoute::parse(""), None);
        assert_eq!(AdminRoute::parse("/unknown"), None);
        assert_eq!(AdminRoute::parse("/primings/0"), None);
    }
}
