use std::{
  collections::{HashMap, VecDeque},
  sync::Mutex,
  time::{Duration, Instant},
};

const DEFAULT_MAX_REQUESTS: usize = 100;
const DEFAULT_WINDOW_SECS: u64 = 60;

/// Sliding-window limiter keyed by caller identifier.
#[derive(Debug)]
pub struct RateLimiter {
  max_requests: usize,
  window: Duration,
  requests: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl Default for RateLimiter {
  fn default() -> Self {
    Self::new(DEFAULT_MAX_REQUESTS, Duration::from_secs(DEFAULT_WINDOW_SECS))
  }
}

impl RateLimiter {
  #[must_use]
  pub fn new(max_requests: usize, window: Duration) -> Self {
    Self {
      max_requests,
      window,
      requests: Mutex::new(HashMap::new()),
    }
  }

  /// Reads `RATE_LIMIT_REQUESTS` and `RATE_LIMIT_WINDOW` (seconds), falling back to defaults.
  #[must_use]
  pub fn from_env() -> Self {
    let max_requests = std::env::var("RATE_LIMIT_REQUESTS")
      .ok()
      .and_then(|v| v.parse().ok())
      .unwrap_or(DEFAULT_MAX_REQUESTS);
    let window = std::env::var("RATE_LIMIT_WINDOW")
      .ok()
      .and_then(|v| v.parse().ok())
      .map_or(Duration::from_secs(DEFAULT_WINDOW_SECS), Duration::from_secs);
    Self::new(max_requests, window)
  }

  /// Records a request for `identifier` and reports whether it is within the limit.
  pub fn check(&self, identifier: &str) -> bool {
    self.check_at(identifier, Instant::now())
  }

  fn check_at(&self, identifier: &str, now: Instant) -> bool {
    let mut requests = self.requests.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let history = requests.entry(identifier.to_string()).or_default();

    while history
      .front()
      .is_some_and(|&seen| now.saturating_duration_since(seen) >= self.window)
    {
      history.pop_front();
    }

    if history.len() >= self.max_requests {
      return false;
    }

    history.push_back(now);
    true
  }
}
