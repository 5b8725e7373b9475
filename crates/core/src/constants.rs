//! Constants used throughout the emergency room core crate.

/// Holding-area capacity used when no explicit capacity is configured.
pub const DEFAULT_HOLDING_CAPACITY: usize = 5;

/// Environment variable holding the holding-area capacity.
pub const HOLDING_CAPACITY_ENV: &str = "ER_HOLDING_CAPACITY";

/// Environment variable holding the overflow policy (`reject` or `evict-oldest`).
pub const OVERFLOW_POLICY_ENV: &str = "ER_OVERFLOW_POLICY";

/// Environment variable holding the REST bind address.
pub const REST_ADDR_ENV: &str = "ER_REST_ADDR";

/// REST bind address used when `ER_REST_ADDR` is unset.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";
