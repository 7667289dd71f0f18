//! True-random number source backed by the random.org JSON-RPC API
//!
//! This crate provides:
//! - The random.org client (`RandomOrgClient`)
//! - A rate limiter shared by every draw made through one client
//! - The clock seam used to test the rate limiter

pub mod client;
pub mod clock;
pub mod limiter;
pub mod protocol;

pub use client::{MIN_CALL_INTERVAL, RANDOM_ORG_ENDPOINT, RandomOrgClient};
pub use clock::{Clock, SystemClock};
pub use limiter::RateLimiter;
