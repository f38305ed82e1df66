//! Time-Related Constants
//!
//! Sampling cadence and connectivity polling of the reference deployment.

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Period between two sampling cycles (seconds).
///
/// Half an hour matches the cadence the ingestion service expects.
pub const DEFAULT_SAMPLE_PERIOD_SECS: u64 = 1800;

/// Delay between two network association checks (milliseconds).
pub const NETWORK_POLL_INTERVAL_MS: u64 = MS_PER_SECOND;
