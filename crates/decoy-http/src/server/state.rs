//! State shared by every connection.

use super::transform::{RequestTemplateTransformer, ResponseTransformer};
use crate::config::DEFAULT_ADMIN_PREFIX;
use crate::engine::StubEngine;
use std::sync::Arc;

pub struct ServerState {
    pub engine: Arc<StubEngine>,
    /// Without trailing slash
    pub admin_prefix: String,
    pub transformer: Arc<dyn ResponseTransformer>,
}

impl ServerState {
    pub fn new(engine: Arc<StubEngine>) -> Self {
        Self {
            engine,
            admin_prefix: DEFAULT_ADMIN_PREFIX.to_string(),
            transformer: Arc::new(RequestTemplateTransformer),
        }
    }

    pub fn with_admin_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.admin_prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_transformer(mut self, transformer: Arc<dyn ResponseTransformer>) -> Self {
        self.transformer = transformer;
        self
    }

    /// Path below the admin prefix, or `None` for stub traffic.
    pub fn admin_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.admin_prefix.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}
