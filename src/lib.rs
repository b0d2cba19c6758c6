//! Throttled client for the product-marking registry's document API.
//!
//! Documents are encoded, admitted by a sliding-window rate limiter and then
//! handed to a [`RequestExecutor`](providers::RequestExecutor). The limiter
//! guarantees that no more than the configured number of requests leave the
//! process within any trailing window, however many tasks submit at once.

pub mod client;
pub mod documents;
pub mod metrics;
pub mod providers;
pub mod settings;
pub mod utility;

pub use client::{ClientError, CrptClient};
pub use documents::{Document, Response};
pub use providers::Signature;
pub use utility::rate_limiter::{RateLimiter, SlidingWindowRateLimiter};
