//! Pipeline stages wrapping every route.
//!
//! Fixed order: rate-limit admission, request log, time budget, CORS, auth
//! gate, activity log. A rejecting stage short-circuits everything after it.
//! CORS lives in the router setup as a tower-http layer; the rest are
//! middleware functions here.

pub mod activity;
pub mod rate_limit;
pub mod request_log;
pub mod time_budget;

pub use activity::activity_log_middleware;
pub use rate_limit::{rate_limit_middleware, Decision, SlidingWindowLimiter};
pub use request_log::request_log_middleware;
pub use time_budget::time_budget_middleware;
