//! Retry + circuit breaker composition around one provider.
//!
//! [`FetchPipeline::attempt`] is the single entry point the sweep uses to
//! talk to a provider: it consults the breaker, runs a bounded retry loop
//! with exponential backoff, and reports exactly one request outcome back
//! to the breaker per call (the whole retry loop counts as one request,
//! mirroring breaker-wraps-retry nesting).

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::errors::{RetryClass, WeatherDataError};
use crate::models::ProviderObservation;
use crate::provider::WeatherProvider;
use crate::resilience::{CircuitBreaker, CircuitBreakerConfig, CircuitState};

/// Default number of attempts per fetch.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default backoff base delay; doubles after each failed attempt.
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(300);

/// Retry policy for one provider fetch.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Maximum attempts, including the first.
    pub max_attempts: u32,
    /// Initial backoff delay; doubles after each failed attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

/// Why a fetch attempt terminally failed.
#[derive(Debug)]
pub enum FailureCause {
    /// The circuit breaker was open; the provider was never contacted.
    CircuitOpen,
    /// A non-retryable error surfaced (rate limit or malformed payload).
    NonRetryable(WeatherDataError),
    /// Every attempt failed with a transient error.
    RetriesExhausted {
        /// How many attempts were made.
        attempts: u32,
        /// The error from the final attempt.
        last: WeatherDataError,
    },
}

/// Terminal failure of one pipeline attempt.
///
/// Carries the provider tag and the cause for observability. Never retried
/// outside the pipeline.
#[derive(Debug)]
pub struct FetchFailure {
    /// The provider whose fetch failed.
    pub provider: &'static str,
    /// The terminal cause.
    pub cause: FailureCause,
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            FailureCause::CircuitOpen => {
                write!(f, "fetch from '{}' short-circuited: breaker open", self.provider)
            }
            FailureCause::NonRetryable(err) => {
                write!(f, "fetch from '{}' failed: {}", self.provider, err)
            }
            FailureCause::RetriesExhausted { attempts, last } => write!(
                f,
                "fetch from '{}' failed after {} attempts: {}",
                self.provider, attempts, last
            ),
        }
    }
}

impl std::error::Error for FetchFailure {}

/// Resilience wrapper around a single provider.
///
/// One instance per provider, built once at startup and shared by every
/// location's fetch attempts; the breaker inside is the only mutable state.
pub struct FetchPipeline {
    provider: Arc<dyn WeatherProvider>,
    breaker: CircuitBreaker,
    retry: RetryPolicy,
}

impl FetchPipeline {
    /// Wrap `provider` with default retry and breaker settings.
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let breaker = CircuitBreaker::new(provider.id());
        Self {
            provider,
            breaker,
            retry: RetryPolicy::default(),
        }
    }

    /// Wrap `provider` with custom retry and breaker settings.
    pub fn with_config(
        provider: Arc<dyn WeatherProvider>,
        breaker_config: CircuitBreakerConfig,
        retry: RetryPolicy,
    ) -> Self {
        let breaker = CircuitBreaker::with_config(provider.id(), breaker_config);
        Self {
            provider,
            breaker,
            retry,
        }
    }

    /// The wrapped provider's identifier.
    pub fn id(&self) -> &'static str {
        self.provider.id()
    }

    /// Current breaker state, for logging alongside failures.
    pub fn breaker_state(&self) -> CircuitState {
        self.breaker.state()
    }

    /// Attempt to fetch the current weather for a location.
    ///
    /// Either yields a normalized observation or a terminal
    /// [`FetchFailure`]. Transient errors are absorbed by the retry loop
    /// and only surface after the attempt budget is exhausted; terminal
    /// errors abort immediately without consuming remaining attempts.
    pub async fn attempt(
        &self,
        location_name: &str,
    ) -> Result<ProviderObservation, FetchFailure> {
        if !self.breaker.is_allowed() {
            debug!(
                "Circuit breaker open for '{}', skipping fetch for '{}'",
                self.id(),
                location_name
            );
            return Err(FetchFailure {
                provider: self.id(),
                cause: FailureCause::CircuitOpen,
            });
        }

        let mut delay = self.retry.base_delay;
        let mut last_error: Option<WeatherDataError> = None;

        for attempt in 1..=self.retry.max_attempts {
            match self.provider.current(location_name).await {
                Ok(observation) => {
                    self.breaker.record_success();
                    return Ok(observation);
                }
                Err(err) if err.retry_class() == RetryClass::Terminal => {
                    warn!(
                        "Non-retryable error from '{}' for '{}': {}",
                        self.id(),
                        location_name,
                        err
                    );
                    self.breaker.record_failure();
                    return Err(FetchFailure {
                        provider: self.id(),
                        cause: FailureCause::NonRetryable(err),
                    });
                }
                Err(err) => {
                    warn!(
                        "Attempt {}/{} against '{}' for '{}' failed: {}",
                        attempt,
                        self.retry.max_attempts,
                        self.id(),
                        location_name,
                        err
                    );
                    last_error = Some(err);

                    if attempt < self.retry.max_attempts {
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    }
                }
            }
        }

        self.breaker.record_failure();

        let last = last_error.unwrap_or(WeatherDataError::Network {
            provider: self.id(),
            message: "no attempts were made".to_string(),
        });

        Err(FetchFailure {
            provider: self.id(),
            cause: FailureCause::RetriesExhausted {
                attempts: self.retry.max_attempts,
                last,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Scripted provider outcome for one call.
    enum Step {
        Ok,
        Transient,
        RateLimited,
    }

    struct ScriptedProvider {
        script: Mutex<VecDeque<Step>>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(steps: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(steps.into()),
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        fn observation() -> ProviderObservation {
            ProviderObservation {
                source: "SCRIPTED",
                temperature: 10.0,
                humidity: 80,
                wind_speed: 3.0,
                condition: "clear".to_string(),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        fn id(&self) -> &'static str {
            "SCRIPTED"
        }

        async fn current(&self, _: &str) -> Result<ProviderObservation, WeatherDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self.script.lock().unwrap().pop_front();
            match step {
                Some(Step::Ok) | None => Ok(Self::observation()),
                Some(Step::Transient) => Err(WeatherDataError::Network {
                    provider: "SCRIPTED",
                    message: "connection reset".to_string(),
                }),
                Some(Step::RateLimited) => Err(WeatherDataError::RateLimited {
                    provider: "SCRIPTED",
                }),
            }
        }
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_transient_failures_then_success() {
        let provider = ScriptedProvider::new(vec![Step::Transient, Step::Transient, Step::Ok]);
        let pipeline = FetchPipeline::with_config(
            provider.clone(),
            CircuitBreakerConfig::default(),
            fast_retry(),
        );

        let result = pipeline.attempt("Paris").await;
        assert!(result.is_ok());
        assert_eq!(provider.calls(), 3);
        assert_eq!(pipeline.breaker_state(), CircuitState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_aborts_after_one_call() {
        let provider = ScriptedProvider::new(vec![Step::RateLimited, Step::Ok]);
        let pipeline = FetchPipeline::with_config(
            provider.clone(),
            CircuitBreakerConfig::default(),
            fast_retry(),
        );

        let failure = pipeline.attempt("Paris").await.unwrap_err();
        assert_eq!(provider.calls(), 1);
        assert!(matches!(
            failure.cause,
            FailureCause::NonRetryable(WeatherDataError::RateLimited { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_transient_exhausts_retries() {
        let provider =
            ScriptedProvider::new(vec![Step::Transient, Step::Transient, Step::Transient]);
        let pipeline = FetchPipeline::with_config(
            provider.clone(),
            CircuitBreakerConfig::default(),
            fast_retry(),
        );

        let failure = pipeline.attempt("Paris").await.unwrap_err();
        assert_eq!(provider.calls(), 3);
        assert!(matches!(
            failure.cause,
            FailureCause::RetriesExhausted { attempts: 3, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_breaker_skips_adapter_entirely() {
        let provider = ScriptedProvider::new(vec![Step::Transient, Step::Transient, Step::Transient]);
        let breaker_config = CircuitBreakerConfig {
            min_requests: 1,
            open_timeout: Duration::from_secs(3600),
            ..CircuitBreakerConfig::default()
        };
        let pipeline =
            FetchPipeline::with_config(provider.clone(), breaker_config, fast_retry());

        // First attempt exhausts its retries and records the one breaker
        // failure that trips the circuit (1/1 > 50%).
        let _ = pipeline.attempt("Paris").await.unwrap_err();
        assert_eq!(provider.calls(), 3);
        assert_eq!(pipeline.breaker_state(), CircuitState::Open);

        // Second attempt short-circuits without touching the adapter.
        let failure = pipeline.attempt("Paris").await.unwrap_err();
        assert_eq!(provider.calls(), 3);
        assert!(matches!(failure.cause, FailureCause::CircuitOpen));
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_breaker_request_per_attempt_call() {
        let provider = ScriptedProvider::new(vec![
            Step::Transient,
            Step::Transient,
            Step::Transient,
            Step::Ok,
        ]);
        let pipeline = FetchPipeline::with_config(
            provider.clone(),
            CircuitBreakerConfig::default(),
            fast_retry(),
        );

        // Three adapter calls, but one breaker request.
        let _ = pipeline.attempt("Paris").await.unwrap_err();
        assert_eq!(pipeline.breaker.counters(), (1, 1));

        let _ = pipeline.attempt("Paris").await.unwrap();
        assert_eq!(pipeline.breaker.counters(), (2, 1));
    }
}
