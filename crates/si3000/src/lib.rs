//! Blocking driver for the Si3000 voice-band codec
//!
//! The codec sits behind a bridge that exposes a control/status register and
//! four byte-wide data ports. Register access and PCM streaming both run a
//! polled handshake over those five bytes.
//!
//! # Layers
//!
//! ```text
//! VoiceCodec (codec)            ← application-facing operations
//!         ↓
//! Si3000 (controller)           ← bring-up, gain, status, power
//!         ↓
//! RegisterChannel / SamplePipe  ← secondary / primary frame handshake
//!         ↓
//! Bus (bus)                     ← MmioBus on hardware, SimulatedBus in tests
//! ```
//!
//! Flag waits follow a [`PollPolicy`]: [`PollPolicy::Blocking`] spins
//! forever like the hardware contract asks, [`PollPolicy::Bounded`] turns a
//! dead chip into [`Error::Timeout`].
//!
//! # Features
//!
//! - `defmt`: `defmt::Format` derives and driver log lines
//! - `std`: links `std` and implements `std::error::Error` for [`Error`],
//!   so host tools can propagate driver errors with `?`
//!
//! # Example
//!
//! ```
//! use si3000::{mock::SimulatedBus, Si3000, VoiceCodec};
//! use embedded_hal_mock::eh1::delay::NoopDelay;
//!
//! let mut bus = SimulatedBus::new();
//! let mut codec = Si3000::new(&mut bus, NoopDelay);
//! codec.begin().unwrap();
//! codec.output_volume(20).unwrap();
//! let byte = codec.sample_compress(-1000);
//! codec.sample_write(codec.sample_expand(byte) as u16).unwrap();
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
// Pedantic lints suppressed for this driver crate:
#![allow(clippy::doc_markdown)] // register and flag names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio_types;
pub mod bus;
pub mod channel;
pub mod codec;
pub mod config;
pub mod controller;
pub mod error;
pub mod mock;
pub mod pipe;
pub mod poll;
pub mod registers;

pub use audio_types::{GainLevel, OutOfRangeError};
pub use bus::{Bus, ControlStatus, MmioBus, MmioMap};
pub use channel::RegisterChannel;
pub use codec::VoiceCodec;
pub use config::Si3000Config;
pub use controller::{Si3000, StatusReport};
pub use error::Error;
pub use g711::Law;
pub use pipe::SamplePipe;
pub use poll::{Flag, PollPolicy};
