//! Recorded exchange.

use crate::request::RequestPattern;
use crate::response::Response;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One served request and the response it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub request: RequestPattern,
    pub response: Response,
    pub recorded_at: DateTime<Utc>,
}

impl Exchange {
    pub fn new(request: RequestPattern, response: Response) -> Self {
        Self {
            request,
            response,
            recorded_at: Utc::now(),
        }
    }
}
