//! Sliding-window admission control, keyed by client network address.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tasklist_core::AppError;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::HttpAppError;

/// Outcome of an admission check.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Rejected { retry_after: Duration },
}

/// Per-client sliding window over admission timestamps.
///
/// One mutex guards the whole map so each admission's
/// read-compact-compare-append runs as a single atomic unit; the deques are
/// append-only under that lock, which keeps every per-client sequence
/// monotonic and makes the stale prefix contiguous.
pub struct SlidingWindowLimiter {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
    max_clients: usize,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration, max_clients: usize) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window,
            max_clients,
        }
    }

    /// Admit or reject one request from `client`, recording the timestamp
    /// only on admission. Rejections report how long until the oldest
    /// admitted timestamp leaves the window.
    pub async fn admit(&self, client: &str) -> Decision {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        if !windows.contains_key(client) && windows.len() >= self.max_clients {
            Self::evict(&mut windows, now, self.window, self.max_clients);
        }

        let timestamps = windows.entry(client.to_string()).or_default();
        while timestamps
            .front()
            .is_some_and(|admitted| now.duration_since(*admitted) >= self.window)
        {
            timestamps.pop_front();
        }

        if timestamps.len() >= self.max_requests {
            let retry_after = timestamps
                .front()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(self.window);
            return Decision::Rejected { retry_after };
        }

        timestamps.push_back(now);
        Decision::Allowed
    }

    /// Bound the number of tracked clients: drop everyone whose window is
    /// entirely stale, then, if still at capacity, the client with the oldest
    /// most-recent admission.
    fn evict(
        windows: &mut HashMap<String, VecDeque<Instant>>,
        now: Instant,
        window: Duration,
        max_clients: usize,
    ) {
        windows.retain(|_, timestamps| {
            timestamps
                .back()
                .is_some_and(|latest| now.duration_since(*latest) < window)
        });

        if windows.len() >= max_clients {
            let oldest = windows
                .iter()
                .min_by_key(|(_, timestamps)| timestamps.back().copied())
                .map(|(client, _)| client.clone());
            if let Some(client) = oldest {
                windows.remove(&client);
                tracing::debug!(client = %client, "evicted rate limit window at capacity");
            }
        }
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.windows.lock().await.len()
    }
}

fn client_address(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Pipeline entry stage: every request is admitted or rejected here before
/// any other stage runs. Rejections map to 429 with a Retry-After header.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<SlidingWindowLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_address(&request);
    match limiter.admit(&client).await {
        Decision::Allowed => next.run(request).await,
        Decision::Rejected { retry_after } => {
            let retry_after_secs = retry_after.as_secs().max(1);
            let mut response = HttpAppError(AppError::RateLimited { retry_after_secs }).into_response();
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert("Retry-After", value);
            }
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    fn limiter(max_requests: usize, window_secs: u64) -> SlidingWindowLimiter {
        SlidingWindowLimiter::new(max_requests, Duration::from_secs(window_secs), 16)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejects_after_window_is_full() {
        let limiter = limiter(3, 60);
        for _ in 0..3 {
            assert_eq!(limiter.admit("1.2.3.4").await, Decision::Allowed);
        }
        assert!(matches!(
            limiter.admit("1.2.3.4").await,
            Decision::Rejected { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_admits_again_after_window_elapses() {
        let limiter = limiter(2, 60);
        assert_eq!(limiter.admit("1.2.3.4").await, Decision::Allowed);
        advance(Duration::from_secs(10)).await;
        assert_eq!(limiter.admit("1.2.3.4").await, Decision::Allowed);
        assert!(matches!(
            limiter.admit("1.2.3.4").await,
            Decision::Rejected { .. }
        ));

        // 51s after the first admission it leaves the window, freeing a slot.
        advance(Duration::from_secs(51)).await;
        assert_eq!(limiter.admit("1.2.3.4").await, Decision::Allowed);
    }

    /// Rejected attempts are not recorded, so they cannot extend the window.
    #[tokio::test(start_paused = true)]
    async fn test_rejections_are_not_recorded() {
        let limiter = limiter(1, 60);
        assert_eq!(limiter.admit("1.2.3.4").await, Decision::Allowed);

        advance(Duration::from_secs(30)).await;
        assert!(matches!(
            limiter.admit("1.2.3.4").await,
            Decision::Rejected { .. }
        ));

        advance(Duration::from_secs(31)).await;
        assert_eq!(limiter.admit("1.2.3.4").await, Decision::Allowed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_tracks_oldest_admission() {
        let limiter = limiter(1, 60);
        assert_eq!(limiter.admit("1.2.3.4").await, Decision::Allowed);
        advance(Duration::from_secs(45)).await;
        match limiter.admit("1.2.3.4").await {
            Decision::Rejected { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(15));
            }
            Decision::Allowed => panic!("expected rejection"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_clients_are_independent() {
        let limiter = limiter(1, 60);
        assert_eq!(limiter.admit("1.1.1.1").await, Decision::Allowed);
        assert_eq!(limiter.admit("2.2.2.2").await, Decision::Allowed);
        assert!(matches!(
            limiter.admit("1.1.1.1").await,
            Decision::Rejected { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_clients_are_swept_at_capacity() {
        let limiter = SlidingWindowLimiter::new(5, Duration::from_secs(60), 3);
        for client in ["a", "b", "c"] {
            assert_eq!(limiter.admit(client).await, Decision::Allowed);
        }
        assert_eq!(limiter.tracked_clients().await, 3);

        // All three windows go stale; a new client reclaims their slots.
        advance(Duration::from_secs(61)).await;
        assert_eq!(limiter.admit("d").await, Decision::Allowed);
        assert_eq!(limiter.tracked_clients().await, 1);
    }
}
