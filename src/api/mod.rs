pub mod forms;
pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::ml::ModelGateway;
use std::time::Instant;

/// Default cap on request bodies when none is configured
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: ModelGateway,
    pub started_at: Instant,
    pub body_limit: usize,
}

impl AppState {
    pub fn new(gateway: ModelGateway) -> Self {
        Self {
            gateway,
            started_at: Instant::now(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Set the largest accepted request body
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }
}
