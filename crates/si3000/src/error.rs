//! Driver error type.

use crate::poll::Flag;

/// Errors returned by the Si3000 driver.
///
/// With the default [`PollPolicy::Blocking`](crate::poll::PollPolicy) no
/// hardware operation ever fails; only a bounded policy or an invalid
/// configuration produces one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A bounded poll expired before the bridge flag reached its state.
    #[error("timed out waiting for {flag} after {polls} polls")]
    Timeout {
        /// Condition that was never met.
        flag: Flag,
        /// Number of CSR reads performed.
        polls: u32,
    },
    /// A configuration field holds a value the driver cannot use.
    #[error("invalid configuration: {field}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
    },
}
