//! Flag polling.
//!
//! Every step of the bridge handshake waits for one of two CSR conditions.
//! How long to wait is a [`PollPolicy`]: the hardware contract is to spin
//! until the flag appears, while tests and watchdog-guarded firmware can
//! bound the number of polls.

use core::fmt;

use crate::bus::{Bus, ControlStatus};
use crate::error::Error;

/// CSR condition a handshake step waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flag {
    /// `WR_BUSY` reads clear: the write ports are free.
    WrBusyClear,
    /// `DATA_AVAIL` reads set: a word is waiting in the read ports.
    DataAvailable,
}

impl Flag {
    /// Whether `csr` satisfies this condition.
    pub fn satisfied(self, csr: ControlStatus) -> bool {
        match self {
            Self::WrBusyClear => !csr.contains(ControlStatus::WR_BUSY),
            Self::DataAvailable => csr.contains(ControlStatus::DATA_AVAIL),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrBusyClear => f.write_str("WR_BUSY clear"),
            Self::DataAvailable => f.write_str("DATA_AVAIL set"),
        }
    }
}

/// How long to wait for a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollPolicy {
    /// Spin until the condition holds. A dead chip hangs the caller.
    #[default]
    Blocking,
    /// Give up after `max_polls` unsuccessful reads.
    Bounded {
        /// Number of reads before [`Error::Timeout`].
        max_polls: u32,
    },
}

impl PollPolicy {
    /// Call `ready` until it returns `true`.
    ///
    /// Returns the number of failed polls in `Err` when a bounded policy
    /// runs out.
    pub fn wait_until(self, mut ready: impl FnMut() -> bool) -> Result<(), u32> {
        match self {
            Self::Blocking => {
                while !ready() {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            Self::Bounded { max_polls } => {
                for _ in 0..max_polls {
                    if ready() {
                        return Ok(());
                    }
                }
                Err(max_polls)
            }
        }
    }
}

/// Wait until `flag` holds on `bus`.
pub(crate) fn wait_for<B: Bus>(bus: &mut B, policy: PollPolicy, flag: Flag) -> Result<(), Error> {
    policy
        .wait_until(|| flag.satisfied(bus.csr()))
        .map_err(|polls| {
            #[cfg(feature = "defmt")]
            defmt::warn!("si3000: timed out waiting for {} ({} polls)", flag, polls);
            Error::Timeout { flag, polls }
        })
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn flag_conditions() {
        assert!(Flag::WrBusyClear.satisfied(ControlStatus::empty()));
        assert!(!Flag::WrBusyClear.satisfied(ControlStatus::WR_BUSY));
        assert!(Flag::DataAvailable.satisfied(ControlStatus::DATA_AVAIL));
        assert!(!Flag::DataAvailable.satisfied(ControlStatus::RESET_N));
    }

    #[test]
    fn blocking_waits_until_ready() {
        let mut calls = 0u32;
        let result = PollPolicy::Blocking.wait_until(|| {
            calls += 1;
            calls == 50
        });
        assert_eq!(result, Ok(()));
        assert_eq!(calls, 50);
    }

    #[test]
    fn bounded_gives_up() {
        let mut calls = 0u32;
        let result = PollPolicy::Bounded { max_polls: 7 }.wait_until(|| {
            calls += 1;
            false
        });
        assert_eq!(result, Err(7));
        assert_eq!(calls, 7);
    }

    #[test]
    fn bounded_succeeds_on_last_poll() {
        let mut calls = 0u32;
        let result = PollPolicy::Bounded { max_polls: 3 }.wait_until(|| {
            calls += 1;
            calls == 3
        });
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn default_is_blocking() {
        assert_eq!(PollPolicy::default(), PollPolicy::Blocking);
    }
}
