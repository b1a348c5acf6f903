//! Per-provider circuit breaker for fault tolerance.
//!
//! Implements the circuit breaker pattern to prevent hammering a provider
//! that is already failing. The circuit has three states:
//!
//! - **Closed**: Normal operation, requests are allowed through. A rolling
//!   window tracks request and failure counts.
//! - **Open**: Provider is failing, requests are blocked without touching
//!   the network.
//! - **HalfOpen**: Testing recovery with a single probe request.
//!
//! One instance is owned per provider by that provider's fetch pipeline,
//! constructed once at startup. State is in-memory and resets on restart.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

/// Default minimum requests in the window before the breaker may trip.
const DEFAULT_MIN_REQUESTS: u32 = 10;

/// Default failure rate above which the breaker trips.
const DEFAULT_FAILURE_RATE_THRESHOLD: f64 = 0.5;

/// Default length of the rolling counting window while Closed.
const DEFAULT_WINDOW: Duration = Duration::from_secs(30);

/// Default time to wait in Open before admitting a half-open probe.
const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Circuit breaker state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CircuitState {
    /// Normal operation - requests are allowed.
    Closed,
    /// Provider is failing - requests are blocked.
    Open,
    /// Testing recovery - a single probe is allowed.
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Open => write!(f, "Open"),
            Self::HalfOpen => write!(f, "HalfOpen"),
        }
    }
}

/// Circuit breaker configuration.
#[derive(Clone, Debug)]
pub struct CircuitBreakerConfig {
    /// Minimum requests in the rolling window before the breaker may trip.
    pub min_requests: u32,
    /// Failure rate (failures / requests) above which the breaker trips.
    pub failure_rate_threshold: f64,
    /// Length of the rolling counting window while Closed; counters reset
    /// when it elapses.
    pub window: Duration,
    /// Time to wait in Open before admitting the half-open probe.
    pub open_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            min_requests: DEFAULT_MIN_REQUESTS,
            failure_rate_threshold: DEFAULT_FAILURE_RATE_THRESHOLD,
            window: DEFAULT_WINDOW,
            open_timeout: DEFAULT_OPEN_TIMEOUT,
        }
    }
}

/// Mutable circuit state, guarded by the breaker's mutex.
#[derive(Debug)]
struct Circuit {
    state: CircuitState,
    /// Requests recorded in the current window.
    requests: u32,
    /// Failures recorded in the current window.
    failures: u32,
    /// Start of the current counting window.
    window_started: Instant,
    /// When the circuit last opened.
    opened_at: Option<Instant>,
    /// When the single half-open probe was handed out. A probe whose holder
    /// never reports back expires after the open timeout, so an abandoned
    /// probe cannot wedge the breaker in HalfOpen.
    probe_granted_at: Option<Instant>,
}

impl Circuit {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            requests: 0,
            failures: 0,
            window_started: Instant::now(),
            opened_at: None,
            probe_granted_at: None,
        }
    }

    fn reset_counters(&mut self) {
        self.requests = 0;
        self.failures = 0;
        self.window_started = Instant::now();
    }
}

/// Circuit breaker for a single provider.
///
/// Thread-safe; mutated concurrently by every location's fetch attempt in a
/// sweep. Exactly one breaker request is recorded per pipeline attempt.
pub struct CircuitBreaker {
    provider: &'static str,
    config: CircuitBreakerConfig,
    circuit: Mutex<Circuit>,
}

impl CircuitBreaker {
    /// Create a breaker for `provider` with default settings.
    pub fn new(provider: &'static str) -> Self {
        Self::with_config(provider, CircuitBreakerConfig::default())
    }

    /// Create a breaker with custom configuration.
    pub fn with_config(provider: &'static str, config: CircuitBreakerConfig) -> Self {
        Self {
            provider,
            config,
            circuit: Mutex::new(Circuit::new()),
        }
    }

    /// Lock the circuit mutex, recovering from poison if necessary.
    ///
    /// Worst case after recovery is slightly stale counters, which beats
    /// panicking in the middle of a sweep.
    fn lock_circuit(&self) -> MutexGuard<'_, Circuit> {
        self.circuit.lock().unwrap_or_else(|poisoned| {
            warn!("Circuit breaker mutex for '{}' was poisoned, recovering", self.provider);
            poisoned.into_inner()
        })
    }

    /// Check whether a request is allowed right now.
    ///
    /// Also drives state transitions: the rolling window resets while
    /// Closed, and Open -> HalfOpen once the open timeout has elapsed. In
    /// HalfOpen only one probe is handed out at a time; callers that receive
    /// `true` must report the outcome via `record_success`/`record_failure`.
    /// A probe whose holder never reports expires after the open timeout and
    /// a fresh probe is handed out.
    pub fn is_allowed(&self) -> bool {
        let mut circuit = self.lock_circuit();

        match circuit.state {
            CircuitState::Closed => {
                if circuit.window_started.elapsed() >= self.config.window {
                    circuit.reset_counters();
                }
                true
            }
            CircuitState::Open => {
                let elapsed_timeout = circuit
                    .opened_at
                    .map(|at| at.elapsed() >= self.config.open_timeout)
                    .unwrap_or(true);

                if elapsed_timeout {
                    info!(
                        "Circuit breaker: transitioning '{}' from Open to HalfOpen",
                        self.provider
                    );
                    circuit.state = CircuitState::HalfOpen;
                    circuit.probe_granted_at = Some(Instant::now());
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => {
                let probe_expired = circuit
                    .probe_granted_at
                    .map(|at| at.elapsed() >= self.config.open_timeout)
                    .unwrap_or(true);

                if probe_expired {
                    circuit.probe_granted_at = Some(Instant::now());
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Record a successful request.
    ///
    /// In Closed state counts the request; in HalfOpen closes the circuit
    /// and resets the rolling counters to zero.
    pub fn record_success(&self) {
        let mut circuit = self.lock_circuit();

        match circuit.state {
            CircuitState::Closed => {
                circuit.requests += 1;
                debug!(
                    "Circuit breaker: success for '{}' ({} failures / {} requests)",
                    self.provider, circuit.failures, circuit.requests
                );
            }
            CircuitState::HalfOpen => {
                info!(
                    "Circuit breaker: closing circuit for '{}' after successful probe",
                    self.provider
                );
                circuit.state = CircuitState::Closed;
                circuit.reset_counters();
                circuit.opened_at = None;
                circuit.probe_granted_at = None;
            }
            CircuitState::Open => {
                debug!(
                    "Circuit breaker: unexpected success for '{}' in Open state",
                    self.provider
                );
            }
        }
    }

    /// Record a failed request.
    ///
    /// In Closed state counts the failure and trips the circuit once the
    /// window holds at least `min_requests` requests with a failure rate
    /// above the threshold. In HalfOpen any failure reopens the circuit and
    /// restarts the open timeout.
    pub fn record_failure(&self) {
        let mut circuit = self.lock_circuit();

        match circuit.state {
            CircuitState::Closed => {
                circuit.requests += 1;
                circuit.failures += 1;

                let failure_rate = f64::from(circuit.failures) / f64::from(circuit.requests);
                if circuit.requests >= self.config.min_requests
                    && failure_rate > self.config.failure_rate_threshold
                {
                    info!(
                        "Circuit breaker: opening circuit for '{}' ({} failures / {} requests)",
                        self.provider, circuit.failures, circuit.requests
                    );
                    circuit.state = CircuitState::Open;
                    circuit.opened_at = Some(Instant::now());
                } else {
                    debug!(
                        "Circuit breaker: failure for '{}' ({} failures / {} requests)",
                        self.provider, circuit.failures, circuit.requests
                    );
                }
            }
            CircuitState::HalfOpen => {
                info!(
                    "Circuit breaker: reopening circuit for '{}' after failed probe",
                    self.provider
                );
                circuit.state = CircuitState::Open;
                circuit.opened_at = Some(Instant::now());
                circuit.probe_granted_at = None;
            }
            CircuitState::Open => {
                debug!(
                    "Circuit breaker: additional failure for '{}' (already open)",
                    self.provider
                );
            }
        }
    }

    /// The provider this breaker guards.
    pub fn provider(&self) -> &'static str {
        self.provider
    }

    /// Get the current state.
    pub fn state(&self) -> CircuitState {
        self.lock_circuit().state
    }

    /// Current (requests, failures) counters in the rolling window.
    pub fn counters(&self) -> (u32, u32) {
        let circuit = self.lock_circuit();
        (circuit.requests, circuit.failures)
    }
}
