use std::sync::Arc;

use crate::auth::{StubVerifier, TokenVerifier};
use crate::config::Config;
use crate::rate_limit::RateLimiter;

// app's shared state
pub struct AppState {
    pub config: Config,
    pub rate_limiter: RateLimiter,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rate_limiter = RateLimiter::new(
            config.rate_limit_max_requests,
            config.rate_limit_window,
        );

        Self {
            config,
            rate_limiter,
            verifier: Arc::new(StubVerifier),
        }
    }

    pub fn with_verifier(config: Config, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            verifier,
            ..Self::new(config)
        }
    }
}
