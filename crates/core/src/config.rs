//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the controller or the
//! shared service. Request handling never reads the environment, so every handler sees the same
//! capacity and overflow policy for the life of the process.

use crate::constants::DEFAULT_HOLDING_CAPACITY;
use crate::{TreatmentError, TreatmentResult};
use std::fmt;
use std::str::FromStr;

/// What `admit` does when the active patient must be suspended but the holding area is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Refuse the admission. The active patient keeps being treated and nothing is stored.
    #[default]
    Reject,
    /// Evict the oldest suspended patient to make room and report it to the caller.
    EvictOldest,
}

impl OverflowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverflowPolicy::Reject => "reject",
            OverflowPolicy::EvictOldest => "evict-oldest",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowPolicy {
    type Err = TreatmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(OverflowPolicy::Reject),
            "evict-oldest" | "evict_oldest" => Ok(OverflowPolicy::EvictOldest),
            other => Err(TreatmentError::InvalidInput(format!(
                "unknown overflow policy '{}' (expected 'reject' or 'evict-oldest')",
                other
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    holding_capacity: usize,
    overflow_policy: OverflowPolicy,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `TreatmentError::InvalidInput` if `holding_capacity` is zero.
    pub fn new(holding_capacity: usize, overflow_policy: OverflowPolicy) -> TreatmentResult<Self> {
        if holding_capacity == 0 {
            return Err(TreatmentError::InvalidInput(
                "holding capacity must be at least 1".into(),
            ));
        }

        Ok(Self {
            holding_capacity,
            overflow_policy,
        })
    }

    pub fn holding_capacity(&self) -> usize {
        self.holding_capacity
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            holding_capacity: DEFAULT_HOLDING_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the holding capacity from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_HOLDING_CAPACITY`].
pub fn holding_capacity_from_env_value(value: Option<String>) -> TreatmentResult<usize> {
    let Some(value) = non_blank(value) else {
        return Ok(DEFAULT_HOLDING_CAPACITY);
    };

    match value.parse::<usize>() {
        Ok(0) => Err(TreatmentError::InvalidInput(
            "holding capacity must be at least 1".into(),
        )),
        Ok(capacity) => Ok(capacity),
        Err(_) => Err(TreatmentError::InvalidInput(format!(
            "holding capacity must be a positive integer, got '{}'",
            value
        ))),
    }
}

/// Parse the overflow policy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`OverflowPolicy::Reject`].
pub fn overflow_policy_from_env_value(value: Option<String>) -> TreatmentResult<OverflowPolicy> {
    non_blank(value)
        .map(|v| v.parse::<OverflowPolicy>())
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Build a [`CoreConfig`] from raw capacity and policy values, as read from the environment or
/// from command-line flags.
pub fn core_config_from_values(
    capacity: Option<String>,
    policy: Option<String>,
) -> TreatmentResult<CoreConfig> {
    CoreConfig::new(
        holding_capacity_from_env_value(capacity)?,
        overflow_policy_from_env_value(policy)?,
    )
}
