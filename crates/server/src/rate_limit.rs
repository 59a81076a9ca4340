//! Fixed-window rate limiting keyed by client IP.
//!
//! Each client gets `max_requests` per window. Allowed responses carry
//! `X-RateLimit-Limit`, `X-RateLimit-Remaining` and `X-RateLimit-Reset`;
//! rejected ones answer 429 with `Retry-After`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::ErrorBody;
use configs::RateLimitConfig;
use dashmap::DashMap;

pub const LIMITED_MESSAGE: &str = "Too many requests from this IP, please try again later.";

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { limit: u32, remaining: u32, reset_secs: u64 },
    Limited { limit: u32, retry_after_secs: u64 },
}

#[derive(Debug)]
pub struct RateLimiter {
    enabled: bool,
    window: Duration,
    max_requests: u32,
    clients: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new(cfg: &RateLimitConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            window: Duration::from_millis(cfg.window_ms),
            max_requests: cfg.max_requests,
            clients: DashMap::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn check(&self, client: &str) -> Decision {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Decision {
        let mut entry = self
            .clients
            .entry(client.to_string())
            .or_insert(Window { started: now, count: 0 });
        if now.saturating_duration_since(entry.started) >= self.window {
            *entry = Window { started: now, count: 0 };
        }
        let left = self.window.saturating_sub(now.saturating_duration_since(entry.started));
        let reset_secs = ceil_secs(left);
        if entry.count >= self.max_requests {
            return Decision::Limited { limit: self.max_requests, retry_after_secs: reset_secs };
        }
        entry.count += 1;
        Decision::Allowed {
            limit: self.max_requests,
            remaining: self.max_requests - entry.count,
            reset_secs,
        }
    }

    /// Drop windows that have fully elapsed.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.clients
            .retain(|_, w| now.saturating_duration_since(w.started) < self.window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}

fn ceil_secs(d: Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_nanos() > 0 { secs + 1 } else { secs }
}

/// Socket peer address when available, else the first `X-Forwarded-For` hop.
fn client_key(req: &Request) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit(State(limiter): State<Arc<RateLimiter>>, req: Request, next: Next) -> Response {
    if !limiter.enabled() {
        return next.run(req).await;
    }
    let client = client_key(&req);
    match limiter.check(&client) {
        Decision::Allowed { limit, remaining, reset_secs } => {
            let mut response = next.run(req).await;
            set_limit_headers(response.headers_mut(), limit, remaining, reset_secs);
            response
        }
        Decision::Limited { limit, retry_after_secs } => {
            tracing::warn!(client = %client, path = %req.uri().path(), limit, retry_after_secs, "rate limit exceeded");
            let mut response =
                (StatusCode::TOO_MANY_REQUESTS, Json(ErrorBody::new(LIMITED_MESSAGE))).into_response();
            let headers = response.headers_mut();
            set_limit_headers(headers, limit, 0, retry_after_secs);
            headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
            response
        }
    }
}

fn set_limit_headers(headers: &mut HeaderMap, limit: u32, remaining: u32, reset_secs: u64) {
    headers.insert(HeaderName::from_static("x-ratelimit-limit"), HeaderValue::from(limit));
    headers.insert(HeaderName::from_static("x-ratelimit-remaining"), HeaderValue::from(remaining));
    headers.insert(HeaderName::from_static("x-ratelimit-reset"), HeaderValue::from(reset_secs));
}
