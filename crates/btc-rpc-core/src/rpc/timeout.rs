//! Per-call timeout resolution.
//!
//! Exactly one timeout applies to each request. Sources are consulted in
//! order: per-call override, client instance timeout, shared
//! [`DefaultTimeout`], then [`FALLBACK_TIMEOUT`].

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Used when neither the call, the client nor the shared default sets one.
pub const FALLBACK_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared default timeout observed by every client built with this handle,
/// wallet-scoped clients included.
///
/// Clones share the same slot. Nothing resets it automatically: whoever
/// calls [`DefaultTimeout::set`] is responsible for [`DefaultTimeout::reset`].
/// Concurrent writes are not arbitrated.
#[derive(Debug, Clone, Default)]
pub struct DefaultTimeout {
    slot: Arc<RwLock<Option<Duration>>>,
}

impl DefaultTimeout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(timeout: Duration) -> Self {
        let handle = Self::new();
        handle.set(timeout);
        handle
    }

    pub fn get(&self) -> Option<Duration> {
        *self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, timeout: Duration) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(timeout);
    }

    pub fn reset(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Where the effective timeout of a call came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutSource {
    PerCall,
    Instance,
    Default,
    Fallback,
}

impl TimeoutSource {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeoutSource::PerCall => "per-call",
            TimeoutSource::Instance => "instance",
            TimeoutSource::Default => "default",
            TimeoutSource::Fallback => "fallback",
        }
    }
}

pub fn resolve_timeout(
    per_call: Option<Duration>,
    instance: Option<Duration>,
    default: &DefaultTimeout,
) -> (Duration, TimeoutSource) {
    if let Some(timeout) = per_call {
        return (timeout, TimeoutSource::PerCall);
    }
    if let Some(timeout) = instance {
        return (timeout, TimeoutSource::Instance);
    }
    match default.get() {
        Some(timeout) => (timeout, TimeoutSource::Default),
        None => (FALLBACK_TIMEOUT, TimeoutSource::Fallback),
    }
}

/// Render a timeout in seconds, e.g. `0.001` for one millisecond.
pub fn format_timeout(timeout: Duration) -> String {
    timeout.as_secs_f64().to_string()
}
