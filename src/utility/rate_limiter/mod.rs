//! Sliding-window admission control.
//!
//! Every call to [`RateLimiter::acquire`] is checked against the admissions
//! recorded during the trailing window. When the window is full the caller is
//! suspended until the oldest admission expires, then the check is repeated.
//! The admission record sits behind a single mutex that is never held while
//! waiting, and nothing is recorded for a caller that gives up.

pub mod constants;
pub mod errors;
pub mod impls;
pub mod traits;
pub mod types;
pub mod window;

pub use errors::RateLimitError;
pub use traits::RateLimiter;
pub use types::{Admission, RateLimitConfig, SlidingWindowRateLimiter, TimeWindow};
