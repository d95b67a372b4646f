//! # Small-body designation grammar
//!
//! Pattern rules recognising the textual forms of comet and asteroid identifiers, and the
//! MPC packed-designation codec they share.
//!
//! * [`comet`] – `73P-C/Schwassmann Wachmann 3 C`, `C/2013 US10`, `PJ94N020`, ...
//! * [`asteroid`] – `(2) Pallas`, `2001 AT1`, `(228195) 6675 P-L`, `K07Tf8A`, ...
//! * [`packed`] – packed ↔ unpacked conversions.
//!
//! All functions here are pure; classification into a [`crate::target::TargetIdentifier`]
//! happens in [`crate::target`].

pub mod asteroid;
pub mod comet;
pub mod packed;

pub use asteroid::{parse_asteroid, AsteroidDesignation};
pub use comet::{parse_comet, CometDesignation};
