//! Failure isolation for provider fetches: circuit breaking and retry.

mod circuit_breaker;
mod fetcher;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use fetcher::{FailureCause, FetchFailure, FetchPipeline, RetryPolicy};
