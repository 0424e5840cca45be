use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;

use crate::error::ApiError;
use crate::metrics::RATE_LIMITED_TOTAL;
use crate::state::AppState;

// Rate limit entry - tracks requests per IP/key
struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

/// Per-key sliding-window admission control. The window is lazy: expiry is
/// only evaluated when the next request from that key arrives, so a window
/// can drift past its nominal boundary if traffic stops near expiry.
///
/// State is local to this process. In a multi-instance deployment each
/// instance enforces its own independent limit.
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    max_requests: u32,
    window: Duration,
    max_tracked_keys: usize,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::with_capacity(max_requests, window, 10_000)
    }

    pub fn with_capacity(max_requests: u32, window: Duration, max_tracked_keys: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests,
            window,
            max_tracked_keys,
        }
    }

    /// Admits or rejects one request from `key`. Exactly `max_requests`
    /// requests pass within a window; only the request beyond that is
    /// rejected.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();

        // keep the map bounded; stale windows reset on touch anyway, so
        // sweeping them never changes an admission decision
        if self.entries.len() > self.max_tracked_keys {
            self.sweep(now);
        }

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // window expired? reset it
        if now.duration_since(entry.window_start) > self.window {
            entry.count = 1;
            entry.window_start = now;
            return true;
        }

        // under limit? allow
        if entry.count < self.max_requests {
            entry.count += 1;
            return true;
        }

        // over limit
        false
    }

    fn sweep(&self, now: Instant) {
        self.entries
            .retain(|_, entry| now.duration_since(entry.window_start) <= self.window);
    }

    pub fn tracked_keys(&self) -> usize {
        self.entries.len()
    }
}

/// Middleware applying the limiter to every request it wraps, keyed by the
/// client address.
pub async fn gate(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let key = client_key(&req);

    if !state.rate_limiter.check(&key) {
        RATE_LIMITED_TOTAL.inc();
        tracing::warn!(client = %key, "rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }

    next.run(req).await
}

fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
